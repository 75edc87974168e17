use depwhy_types::{Severity, ids};

/// One pairwise compatibility rule.
///
/// The predicate receives the raw specifier strings of `packages.0` and `packages.1`, in that
/// order. Matching is substring-based on the specifier text, not a version comparison.
#[derive(Clone, Copy, Debug)]
pub struct CompatRule {
    pub id: &'static str,
    pub packages: (&'static str, &'static str),
    pub predicate: fn(&str, &str) -> bool,
    pub message: &'static str,
    pub severity: Severity,
}

pub static COMPAT_RULES: &[CompatRule] = &[
    CompatRule {
        id: ids::CHECK_COMPAT_PYTORCH_LIGHTNING_TORCH,
        packages: ("pytorch-lightning", "torch"),
        predicate: lightning_2_with_torch_1,
        message: "pytorch-lightning>=2.0 requires torch>=2.0, but torch<2.0 is specified",
        severity: Severity::High,
    },
    CompatRule {
        id: ids::CHECK_COMPAT_FASTAPI_PYDANTIC,
        packages: ("fastapi", "pydantic"),
        predicate: fastapi_078_with_pydantic_2,
        message: "fastapi==0.78.x requires pydantic v1, but pydantic v2 is specified",
        severity: Severity::High,
    },
    CompatRule {
        id: ids::CHECK_COMPAT_TENSORFLOW_KERAS,
        packages: ("tensorflow", "keras"),
        predicate: tensorflow_1_with_keras_3,
        message: "keras>=3.0 requires TensorFlow 2.x, but TensorFlow 1.x is specified",
        severity: Severity::High,
    },
];

fn contains_any(spec: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| spec.contains(n))
}

// A `<2.` clause only ever fires together with `==1.`, so the pin alone decides.
fn lightning_2_with_torch_1(lightning: &str, torch: &str) -> bool {
    contains_any(lightning, &["==2.", ">=2."]) && torch.contains("==1.")
}

fn fastapi_078_with_pydantic_2(fastapi: &str, pydantic: &str) -> bool {
    contains_any(fastapi, &["==0.78", "==0.7"]) && contains_any(pydantic, &["==2.", ">=2."])
}

fn tensorflow_1_with_keras_3(tensorflow: &str, keras: &str) -> bool {
    tensorflow.contains("==1.") && contains_any(keras, &["==3.", ">=3."])
}
