const LIGHTNING_TORCH: &str = "PyTorch Lightning 2 and later requires PyTorch 2 or newer, because it is built on APIs that the PyTorch 1 series never shipped. The mismatch shows up when a recent Lightning release is pinned next to an older PyTorch. To fix it, upgrade torch to a 2 release or downgrade pytorch-lightning to a 1 release.";

const FASTAPI_PYDANTIC: &str = "This FastAPI release line was written against the Pydantic v1 API and needs its model and validator interfaces. Pydantic v2 rewrote those interfaces, so the pinned FastAPI cannot work with it. To fix it, upgrade FastAPI to a release with Pydantic v2 support or downgrade pydantic to a v1 release.";

const TENSORFLOW_KERAS: &str = "Keras 3 requires TensorFlow 2 because it targets eager execution and the TensorFlow 2 runtime. TensorFlow 1 relies on graph sessions that Keras 3 cannot drive. To fix it, upgrade tensorflow to a 2 release or downgrade keras to a 2 release.";

const DUPLICATE: &str = "The same package is declared more than once with different version specifiers. An installer needs exactly one specifier per package, so conflicting lines leave the outcome ambiguous. To fix it, remove the extra entries and keep a single specifier for each package.";

const GENERIC: &str = "This conflict occurs due to version requirements that cannot all be satisfied at once. Review the specifiers of the packages involved and check which releases work together. Consider an update to compatible versions or let a dependency resolver pick them.";

/// Template paragraph for a prompt, chosen by keyword presence. First match wins; the generic
/// paragraph catches everything else.
pub fn fallback_text(prompt: &str) -> &'static str {
    let prompt = prompt.to_lowercase();
    let has = |word: &str| prompt.contains(word);

    if has("pytorch-lightning") && has("torch") {
        LIGHTNING_TORCH
    } else if has("fastapi") && has("pydantic") {
        FASTAPI_PYDANTIC
    } else if has("tensorflow") && has("keras") {
        TENSORFLOW_KERAS
    } else if has("duplicate") {
        DUPLICATE
    } else {
        GENERIC
    }
}
