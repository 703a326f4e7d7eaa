//! Game file model.
//!
//! The board consumes a JSON game file of rounds → categories → tiles.
//! Tile labels (dollar amounts) are the keys of an ordered JSON map, so
//! `serde_json`'s `preserve_order` feature is load-bearing here: label
//! order in the file is the row order on the board.
//!
//! ```text
//! { "rounds": [ [ { "name": "...", "tiles": {
//!     "200": { "clue": "...", "correct_response": "..." }, ... } }, ... ], ... ] }
//! ```

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

/// One value cell: label plus clue/answer text.
#[derive(Debug, Clone, PartialEq)]
pub struct TileData {
    pub label: String,
    pub clue: String,
    pub answer: String,
}

/// One category column: stable key, display name, ordered tiles.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    /// Canonical addressing key. Game files may omit it, in which case
    /// the display name doubles as the key.
    pub key: String,
    pub name: String,
    pub tiles: Vec<TileData>,
}

/// Parsed and validated game file.
#[derive(Debug, Clone)]
pub struct GameData {
    rounds: Vec<Vec<Category>>,
}

#[derive(Debug)]
pub enum GameDataError {
    Parse(serde_json::Error),
    NoRounds,
    EmptyRound(usize),
    /// Uniform label count per round is an invariant of the grid;
    /// a violating file is rejected outright rather than drawn corrupt.
    NonUniformRound {
        round: usize,
        category: String,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for GameDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "malformed game file: {err}"),
            Self::NoRounds => write!(f, "game file contains no rounds"),
            Self::EmptyRound(round) => write!(f, "round {round} has no categories"),
            Self::NonUniformRound {
                round,
                category,
                expected,
                found,
            } => write!(
                f,
                "round {round}: category \"{category}\" has {found} tiles, expected {expected}"
            ),
        }
    }
}

impl std::error::Error for GameDataError {}

impl From<serde_json::Error> for GameDataError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

// Raw wire shapes, converted into the typed model after parsing.

#[derive(Deserialize)]
struct TileSpec {
    clue: String,
    correct_response: String,
}

#[derive(Deserialize)]
struct CategorySpec {
    #[serde(default)]
    key: Option<String>,
    name: String,
    tiles: serde_json::Map<String, Value>,
}

#[derive(Deserialize)]
struct GameFile {
    rounds: Vec<Vec<CategorySpec>>,
}

impl GameData {
    /// Parse a game file from JSON and validate the grid invariants.
    pub fn from_json(json: &str) -> Result<Self, GameDataError> {
        let file: GameFile = serde_json::from_str(json)?;
        if file.rounds.is_empty() {
            return Err(GameDataError::NoRounds);
        }

        let mut rounds = Vec::with_capacity(file.rounds.len());
        for (round_index, specs) in file.rounds.into_iter().enumerate() {
            if specs.is_empty() {
                return Err(GameDataError::EmptyRound(round_index));
            }

            let mut categories = Vec::with_capacity(specs.len());
            let mut expected_tiles = None;
            for spec in specs {
                let mut tiles = Vec::with_capacity(spec.tiles.len());
                for (label, value) in spec.tiles {
                    let tile: TileSpec = serde_json::from_value(value)?;
                    tiles.push(TileData {
                        label,
                        clue: tile.clue,
                        answer: tile.correct_response,
                    });
                }

                let expected = *expected_tiles.get_or_insert(tiles.len());
                if tiles.len() != expected {
                    return Err(GameDataError::NonUniformRound {
                        round: round_index,
                        category: spec.name,
                        expected,
                        found: tiles.len(),
                    });
                }

                categories.push(Category {
                    key: spec.key.unwrap_or_else(|| spec.name.clone()),
                    name: spec.name,
                    tiles,
                });
            }
            rounds.push(categories);
        }

        Ok(Self { rounds })
    }

    pub fn round(&self, index: usize) -> Option<&[Category]> {
        self.rounds.get(index).map(Vec::as_slice)
    }

    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const TWO_BY_THREE: &str = r#"{
        "rounds": [[
            {
                "name": "SCIENCE",
                "tiles": {
                    "200": { "clue": "A unit of charge", "correct_response": "What is a coulomb?" },
                    "400": { "clue": "He had three laws", "correct_response": "Who is Newton?" },
                    "600": { "clue": "Slowest SI prefix", "correct_response": "What is yocto?" }
                }
            },
            {
                "name": "HISTORY",
                "tiles": {
                    "200": { "clue": "Year of Hastings", "correct_response": "What is 1066?" },
                    "400": { "clue": "First US president", "correct_response": "Who is Washington?" },
                    "600": { "clue": "Fall of Rome, roughly", "correct_response": "What is 476?" }
                }
            }
        ]]
    }"#;

    #[test]
    fn parses_and_preserves_label_order() {
        let data = GameData::from_json(TWO_BY_THREE).unwrap();
        assert_eq!(data.round_count(), 1);
        let round = data.round(0).unwrap();
        assert_eq!(round.len(), 2);
        let labels: Vec<_> = round[0].tiles.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["200", "400", "600"]);
    }

    #[test]
    fn key_defaults_to_name() {
        let data = GameData::from_json(TWO_BY_THREE).unwrap();
        assert_eq!(data.round(0).unwrap()[0].key, "SCIENCE");
    }

    #[test]
    fn explicit_key_is_kept() {
        let json = r#"{ "rounds": [[
            { "key": "sci-1", "name": "SCIENCE", "tiles": {
                "200": { "clue": "c", "correct_response": "r" } } }
        ]] }"#;
        let data = GameData::from_json(json).unwrap();
        assert_eq!(data.round(0).unwrap()[0].key, "sci-1");
    }

    #[test]
    fn rejects_non_uniform_round() {
        let json = r#"{ "rounds": [[
            { "name": "A", "tiles": {
                "200": { "clue": "c", "correct_response": "r" },
                "400": { "clue": "c", "correct_response": "r" } } },
            { "name": "B", "tiles": {
                "200": { "clue": "c", "correct_response": "r" } } }
        ]] }"#;
        match GameData::from_json(json) {
            Err(GameDataError::NonUniformRound {
                category,
                expected,
                found,
                ..
            }) => {
                assert_eq!(category, "B");
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            other => panic!("expected NonUniformRound, got {other:?}"),
        }
    }

    #[test]
    fn rejects_empty_file() {
        assert!(matches!(
            GameData::from_json(r#"{ "rounds": [] }"#),
            Err(GameDataError::NoRounds)
        ));
    }

    #[test]
    fn rejects_empty_round() {
        assert!(matches!(
            GameData::from_json(r#"{ "rounds": [[]] }"#),
            Err(GameDataError::EmptyRound(0))
        ));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            GameData::from_json("not json"),
            Err(GameDataError::Parse(_))
        ));
    }
}
