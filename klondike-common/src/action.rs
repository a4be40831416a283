use crate::board::PileId;

use anyhow::{Context, Result, bail};

/// A player command in the compact replay notation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    /// Deal one card from the stock (`D`).
    Draw,
    /// Turn the waste back into the stock (`R`).
    Redeal,
    /// Move the top `count` cards of `from` onto `to` (`T1:T2@3`).
    Move {
        from: PileId,
        to: PileId,
        count: usize,
    },
    Undo,
    Redo,
}

impl Action {
    pub fn is_redeal(&self) -> bool {
        matches!(self, Action::Redeal)
    }
}

pub fn format_actions(actions: &[Action]) -> String {
    let mut list = vec![];
    let mut i = 0;
    while i < actions.len() {
        match actions[i] {
            Action::Draw => {
                let mut count = 1;
                while i + count < actions.len() && matches!(actions[i + count], Action::Draw) {
                    count += 1;
                }
                let str = if count == 1 {
                    "D".into()
                } else {
                    format!("{count}D")
                };
                list.push(str);
                i += count;
                continue;
            }
            Action::Redeal => list.push("R".into()),
            Action::Undo => list.push("Z".into()),
            Action::Redo => list.push("X".into()),
            Action::Move { from, to, count } => {
                let mut str = format!("{}:{}", format_pile_id(from), format_pile_id(to));
                if count > 1 {
                    str.push_str(&format!("@{count}"));
                }
                list.push(str);
            }
        }
        i += 1;
    }

    let mut output = String::new();
    let max_width = list.iter().map(|s| s.len()).max().unwrap_or_default() + 1;
    for chunk in list.chunks(10) {
        for cmd in chunk {
            output.push_str(&format!("{cmd:<width$}", width = max_width));
        }
        output.push('\n');
    }

    output
}

pub fn parse_actions(s: &str) -> Result<Vec<Action>> {
    let mut actions = Vec::new();
    for part in s.split_whitespace() {
        let part_ctx = || format!("Failed to parse action: '{part}'");
        match part {
            "R" => actions.push(Action::Redeal),
            "Z" => actions.push(Action::Undo),
            "X" => actions.push(Action::Redo),
            _ => {
                if let Some(num_str) = part.strip_suffix('D') {
                    let num = if num_str.is_empty() {
                        1
                    } else {
                        num_str.parse::<usize>().with_context(part_ctx)?
                    };
                    actions.extend(std::iter::repeat_n(Action::Draw, num));
                } else if let Some((from_str, to_part)) = part.split_once(':') {
                    let from = parse_pile_id(from_str).with_context(part_ctx)?;
                    let (to_str, count) = match to_part.split_once('@') {
                        Some((to_s, count_s)) => {
                            (to_s, count_s.parse::<usize>().with_context(part_ctx)?)
                        }
                        None => (to_part, 1),
                    };
                    let to = parse_pile_id(to_str).with_context(part_ctx)?;
                    actions.push(Action::Move { from, to, count });
                } else {
                    bail!("Unknown action format: {part}");
                }
            }
        }
    }
    Ok(actions)
}

fn format_pile_id(id: PileId) -> String {
    match id {
        PileId::Stock => "S".into(),
        PileId::Waste => "W".into(),
        PileId::Foundation(idx) => format!("F{}", idx + 1),
        PileId::Tableau(idx) => format!("T{}", idx + 1),
    }
}

fn parse_pile_id(s: &str) -> Result<PileId> {
    match s {
        "S" => return Ok(PileId::Stock),
        "W" => return Ok(PileId::Waste),
        _ => {}
    }
    let parse_index = |digits: &str| -> Result<usize> {
        let num = digits
            .parse::<usize>()
            .with_context(|| format!("Invalid pile index: {digits}"))?;
        num.checked_sub(1)
            .with_context(|| format!("Pile index starts at 1: {digits}"))
    };
    if let Some(stripped) = s.strip_prefix('T') {
        Ok(PileId::Tableau(parse_index(stripped)?))
    } else if let Some(stripped) = s.strip_prefix('F') {
        Ok(PileId::Foundation(parse_index(stripped)?))
    } else {
        bail!("Invalid pile identifier: {s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_actions() {
        let actions = parse_actions("3D W:F1 T1:T2@3 R Z X").unwrap();
        assert_eq!(
            actions,
            vec![
                Action::Draw,
                Action::Draw,
                Action::Draw,
                Action::Move {
                    from: PileId::Waste,
                    to: PileId::Foundation(0),
                    count: 1
                },
                Action::Move {
                    from: PileId::Tableau(0),
                    to: PileId::Tableau(1),
                    count: 3
                },
                Action::Redeal,
                Action::Undo,
                Action::Redo,
            ]
        );
        assert!(actions[5].is_redeal());
        assert!(!actions[6].is_redeal());
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_actions("T0:T1").is_err());
        assert!(parse_actions("Q:T1").is_err());
        assert!(parse_actions("T1:T2@x").is_err());
        assert!(parse_actions("hello").is_err());
    }

    #[test]
    fn test_format_actions() {
        let actions = parse_actions("D D W:T4 T7:T1@2 R").unwrap();
        let output = format_actions(&actions);
        let tokens: Vec<_> = output.split_whitespace().collect();
        assert_eq!(tokens, vec!["2D", "W:T4", "T7:T1@2", "R"]);
        assert_eq!(parse_actions(&output).unwrap(), actions);
    }
}
