use crate::puzzle::MoveRecord;

fn drops(count: usize) -> &'static str {
    if count == 1 { "drop" } else { "drops" }
}

/// End-of-game listing of moves, numbered from 1 in execution order.
pub fn format_move_history(history: &[MoveRecord]) -> Vec<String> {
    if history.is_empty() {
        return vec!["No moves made (the puzzle started solved).".to_string()];
    }
    history
        .iter()
        .enumerate()
        .map(|(i, mv)| {
            format!(
                "Move {}: tube {} -> tube {} ({} {})",
                i + 1,
                mv.from,
                mv.to,
                mv.count,
                drops(mv.count)
            )
        })
        .collect()
}
