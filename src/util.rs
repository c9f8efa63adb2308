/// Trims a label to fit a fixed column budget, appending an ellipsis when
/// anything was cut. Operates on characters so multi-byte names never split
/// mid-codepoint.
pub fn truncate_label(label: &str, budget: usize) -> String {
    if label.chars().count() <= budget {
        return label.to_string();
    }
    let kept: String = label.chars().take(budget.saturating_sub(3)).collect();
    format!("{kept}...")
}
