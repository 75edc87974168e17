const WHY_TRIGGERS: &[&str] = &["because", "due to", "requires", "needs", "since"];
const FIX_TRIGGERS: &[&str] = &["upgrade", "downgrade", "fix", "change", "update", "remove"];

const WHY_DEFAULT: &str = "Version constraints are incompatible.";
const FIX_DEFAULT: &str = "Adjust version constraints to compatible versions.";

/// First two sentences that explain a cause, or a stock sentence.
pub fn why_it_happens(text: &str) -> String {
    pick_sentences(text, WHY_TRIGGERS).unwrap_or_else(|| WHY_DEFAULT.to_string())
}

/// First two sentences that suggest a remedy, or a stock sentence.
pub fn how_to_fix(text: &str) -> String {
    pick_sentences(text, FIX_TRIGGERS).unwrap_or_else(|| FIX_DEFAULT.to_string())
}

fn pick_sentences(text: &str, triggers: &[&str]) -> Option<String> {
    let picked: Vec<&str> = text
        .split('.')
        .filter(|sentence| {
            let lowered = sentence.to_lowercase();
            triggers.iter().any(|t| lowered.contains(t))
        })
        .map(str::trim)
        .take(2)
        .collect();

    if picked.is_empty() {
        None
    } else {
        Some(format!("{}.", picked.join(". ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_first_two_matching_sentences() {
        let text = "A needs B. Nothing here. C is old because of D. E requires F.";
        assert_eq!(why_it_happens(text), "A needs B. C is old because of D.");
    }

    #[test]
    fn matching_is_case_insensitive_but_keeps_original_case() {
        assert_eq!(how_to_fix(" Upgrade Torch now. Done."), "Upgrade Torch now.");
    }

    #[test]
    fn falls_back_to_stock_sentences() {
        assert_eq!(why_it_happens("Nothing relevant"), WHY_DEFAULT);
        assert_eq!(how_to_fix(""), FIX_DEFAULT);
    }

    #[test]
    fn trigger_inside_a_word_counts() {
        // "prefix" contains "fix".
        assert_eq!(how_to_fix("Add a prefix"), "Add a prefix.");
    }
}
