//! Plain-text rendering of games and analysis results.

use crate::nash::game::StrategicGame;
use crate::nash::grid::{Coordinate, PayoffGrid, Player};

/// Marker shown in place of a payoff that is a committed best response.
pub const BEST_RESPONSE_MARK: &str = "H";

/// Normal-form table, one row per player 1 strategy.
///
/// ```text
///       B1      B2
/// A1  (3, 3)  (0, 5)
/// A2  (5, 0)  (1, 1)
/// ```
pub fn normal_form_table(grid: &PayoffGrid) -> String {
    let cells: Vec<Vec<String>> = (0..grid.rows())
        .map(|row| {
            (0..grid.columns())
                .map(|col| {
                    let p = grid.cell(row, col);
                    format!("({}, {})", p.0, p.1)
                })
                .collect()
        })
        .collect();
    layout(grid, cells)
}

/// Table of committed best responses: each marked side of a cell shows
/// [`BEST_RESPONSE_MARK`] instead of its payoff.
pub fn annotated_table(game: &StrategicGame) -> String {
    let grid = game.grid();
    let cells: Vec<Vec<String>> = (0..grid.rows())
        .map(|row| {
            (0..grid.columns())
                .map(|col| {
                    let p = grid.cell(row, col);
                    let marks = game.marks(Coordinate::new(col, row));
                    let side = |player: Player, value: f64| {
                        if marks.get(player) {
                            BEST_RESPONSE_MARK.to_string()
                        } else {
                            value.to_string()
                        }
                    };
                    format!("({}, {})", side(Player::One, p.0), side(Player::Two, p.1))
                })
                .collect()
        })
        .collect();
    layout(grid, cells)
}

fn layout(grid: &PayoffGrid, cells: Vec<Vec<String>>) -> String {
    let row_labels = grid.strategy_labels(Player::One);
    let col_labels = grid.strategy_labels(Player::Two);

    let label_width = row_labels.iter().map(String::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..grid.columns())
        .map(|col| {
            cells
                .iter()
                .map(|row| row[col].len())
                .chain(std::iter::once(col_labels[col].len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = format!("{:label_width$}", "");
    for (label, width) in col_labels.iter().zip(&widths) {
        out.push_str(&format!("  {:^width$}", label, width = *width));
    }
    out.push('\n');

    for (label, row) in row_labels.iter().zip(&cells) {
        out.push_str(&format!("{:label_width$}", label));
        for (cell, width) in row.iter().zip(&widths) {
            out.push_str(&format!("  {:^width$}", cell, width = *width));
        }
        out.push('\n');
    }
    out
}

/// Render coordinates as `(A1, B1), (A2, B2)`, or `None` when there are none.
pub fn format_coordinates<'a, I>(coords: I) -> String
where
    I: IntoIterator<Item = &'a Coordinate>,
{
    let parts: Vec<String> = coords.into_iter().map(Coordinate::to_string).collect();
    if parts.is_empty() {
        "None".to_string()
    } else {
        parts.join(", ")
    }
}

/// Render a belief vector, e.g. `(0.600, 0.400)` at precision 3.
pub fn format_beliefs(probabilities: &[f64], precision: usize) -> String {
    let parts: Vec<String> = probabilities
        .iter()
        .map(|p| format!("{:.*}", precision, p))
        .collect();
    format!("({})", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nash::grid::CoordinateSet;

    fn prisoners() -> StrategicGame {
        StrategicGame::from_matrix(vec![
            vec![(3.0, 3.0), (0.0, 5.0)],
            vec![(5.0, 0.0), (1.0, 1.0)],
        ])
        .unwrap()
    }

    #[test]
    fn test_normal_form_table() {
        let table = normal_form_table(prisoners().grid());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "      B1      B2  ");
        assert_eq!(lines[1], "A1  (3, 3)  (0, 5)");
        assert_eq!(lines[2], "A2  (5, 0)  (1, 1)");
    }

    #[test]
    fn test_annotated_table_marks_best_responses() {
        let mut game = prisoners();
        assert!(!annotated_table(&game).contains(BEST_RESPONSE_MARK));

        game.find_pure_nash(true);
        let table = annotated_table(&game);
        assert!(table.contains("(H, H)"));
        assert!(table.contains("(H, 0)"));
        assert!(table.contains("(0, H)"));
        assert!(table.contains("(3, 3)"));
    }

    #[test]
    fn test_format_coordinates() {
        let empty = CoordinateSet::new();
        assert_eq!(format_coordinates(&empty), "None");

        let set: CoordinateSet = [Coordinate::new(1, 1), Coordinate::new(0, 0)].into_iter().collect();
        assert_eq!(format_coordinates(&set), "(A1, B1), (A2, B2)");
    }

    #[test]
    fn test_format_beliefs() {
        assert_eq!(format_beliefs(&[0.6, 0.4], 3), "(0.600, 0.400)");
        assert_eq!(format_beliefs(&[1.0 / 3.0; 3], 2), "(0.33, 0.33, 0.33)");
        assert_eq!(format_beliefs(&[], 3), "()");
    }
}
