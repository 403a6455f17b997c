//! Tests for level parsing, board construction and event replay

#[cfg(test)]
mod tests {
    use canalbuilder::BoardError;
    use canalbuilder::io::configuration::{DEFAULT_BOARD_COLS, DEFAULT_BOARD_ORIGIN};
    use canalbuilder::io::level::{LevelFile, TileSpec};
    use canalbuilder::session::events::BoardEvent;
    use canalbuilder::spatial::grid::GridCell;
    use canalbuilder::spatial::tiles::{Rotation, TileTypeId};
    use std::fs;
    use tempfile::TempDir;

    const CUSTOM_LEVEL: &str = r#"{
        "board": {"cols": 4, "rows": 1, "cell_size": 2.0, "origin": [0.0, 0.0]},
        "catalog": [
            {"id": "src", "cells": [2, 1, 2, 1, 1, 1, 2, 1, 2]},
            {"id": "dst", "cells": [2, 1, 2, 1, 1, 1, 2, 1, 2]},
            {"id": "pipe", "cells": [2, 1, 2, 2, 1, 2, 2, 1, 2]}
        ],
        "start": {"tile": "src", "cell": [0, 0]},
        "goal": {"tile": "dst", "cell": [3, 0]},
        "events": [
            {"type": "drop", "tile": "pipe", "x": 2.0, "z": 0.0, "rotation": 90},
            {"type": "drop", "tile": "pipe", "x": 2.6, "z": 0.3},
            {"type": "drop", "tile": "pipe", "x": 4.0, "z": 0.0},
            {"type": "rotate", "cell": [2, 0], "delta": 90},
            {"type": "release"}
        ]
    }"#;

    // Tests an empty document falls back to every default
    // Verified by removing the serde defaults on the board section
    #[test]
    fn test_empty_level_defaults() {
        let level = LevelFile::from_json("{}").unwrap();
        assert_eq!(level, LevelFile::default());
        assert_eq!(level.board.cols, DEFAULT_BOARD_COLS);
        assert_eq!(level.board.origin, DEFAULT_BOARD_ORIGIN);
        assert!(level.catalog.is_none());
        assert!(level.events.is_empty());

        let board = level.build_board().unwrap();
        assert_eq!(board.start_cell(), GridCell::new(0, 0));
        assert_eq!(board.goal_cell(), GridCell::new(19, 19));
        assert_eq!(board.catalog().len(), 5);
    }

    // Tests a custom roster replaces the standard one
    // Verified by always building the standard catalog
    #[test]
    fn test_custom_catalog() {
        let level = LevelFile::from_json(CUSTOM_LEVEL).unwrap();
        let catalog = level.catalog().unwrap();
        assert_eq!(catalog.len(), 3);
        assert!(catalog.contains(&TileTypeId::new("pipe")));
        assert!(!catalog.contains(&TileTypeId::new("Tile_A")));
    }

    // Tests bad rosters are rejected when the board is built
    // Verified by skipping duplicate detection for level rosters
    #[test]
    fn test_bad_catalog_rejected() {
        let mut level = LevelFile::default();
        level.catalog = Some(vec![
            TileSpec {
                id: TileTypeId::new("Start"),
                cells: [2; 9],
            },
            TileSpec {
                id: TileTypeId::new("Start"),
                cells: [1; 9],
            },
        ]);
        assert!(matches!(
            level.build_board(),
            Err(BoardError::DuplicateTileType { .. })
        ));

        level.catalog = Some(vec![TileSpec {
            id: TileTypeId::new("Start"),
            cells: [9; 9],
        }]);
        assert!(matches!(
            level.build_board(),
            Err(BoardError::InvalidSignature { .. })
        ));
    }

    // Tests fixed tiles off the board or with bad geometry fail to build
    // Verified by skipping bounds checks on the fixed tiles
    #[test]
    fn test_invalid_board_rejected() {
        let off_board = LevelFile::from_json(
            r#"{"board": {"cols": 5, "rows": 5}, "goal": {"tile": "Goal", "cell": [5, 0]}}"#,
        )
        .unwrap();
        assert!(matches!(
            off_board.build_board(),
            Err(BoardError::OutOfBounds { .. })
        ));

        let zero = LevelFile::from_json(r#"{"board": {"cols": 0}}"#).unwrap();
        assert!(matches!(
            zero.build_board(),
            Err(BoardError::InvalidParameter { .. })
        ));
    }

    // Tests replay applies events in order and records rejections without aborting
    // Verified by stopping replay at the first rejected event
    #[test]
    fn test_replay_records_rejections() {
        let level = LevelFile::from_json(CUSTOM_LEVEL).unwrap();
        let outcome = level.replay().unwrap();

        // The second drop snaps onto the cell the first already filled
        assert_eq!(outcome.applied, 4);
        assert_eq!(outcome.rejected.len(), 1);
        let rejected = outcome.rejected.first().unwrap();
        assert_eq!(rejected.index, 1);
        assert!(rejected.reason.contains("occupied"));

        assert!(outcome.report.connected);
        assert_eq!(
            outcome.report.path,
            vec![
                GridCell::new(0, 0),
                GridCell::new(1, 0),
                GridCell::new(2, 0),
                GridCell::new(3, 0)
            ]
        );
        assert_eq!(outcome.reachable.len(), 4);
    }

    // Tests a final release is evaluated even when the level records none
    // Verified by returning the last recorded release report
    #[test]
    fn test_replay_always_releases() {
        let mut level = LevelFile::from_json(CUSTOM_LEVEL).unwrap();
        level.events.retain(|event| *event != BoardEvent::Release);
        level.events.pop();

        let outcome = level.replay().unwrap();
        assert!(!outcome.report.connected);
        assert!(outcome.report.path.is_empty());
        assert_eq!(outcome.report.revision, 2);
    }

    // Tests replay_into reports progress after every event
    // Verified by reporting zero-based indices
    #[test]
    fn test_replay_into_progress() {
        let level = LevelFile::from_json(CUSTOM_LEVEL).unwrap();
        let mut controller = level.build_controller().unwrap();
        let mut seen = Vec::new();

        level.replay_into(&mut controller, |done| seen.push(done));
        assert_eq!(seen, vec![1, 2, 3, 4, 5]);
        assert_eq!(
            controller.board().at(GridCell::new(2, 0)).unwrap().rotation,
            Rotation::R90
        );
    }

    // Tests levels load from disk and report missing or malformed files
    // Verified by mapping io errors to LevelParse
    #[test]
    fn test_from_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("level.json");
        fs::write(&path, CUSTOM_LEVEL).unwrap();
        assert_eq!(LevelFile::from_path(&path).unwrap().events.len(), 5);

        let missing = LevelFile::from_path(&temp_dir.path().join("missing.json"));
        assert!(matches!(missing, Err(BoardError::FileSystem { .. })));

        fs::write(&path, "[1, 2").unwrap();
        assert!(matches!(
            LevelFile::from_path(&path),
            Err(BoardError::LevelParse { .. })
        ));
    }

    // Tests a level survives serialization unchanged
    // Verified by skipping the events field when serializing
    #[test]
    fn test_to_json_round_trip() {
        let level = LevelFile::from_json(CUSTOM_LEVEL).unwrap();
        let reparsed = LevelFile::from_json(&level.to_json().unwrap()).unwrap();
        assert_eq!(reparsed, level);
    }

    // Tests outcomes serialize for result files
    // Verified by renaming the rejected field
    #[test]
    fn test_outcome_serializes() {
        let outcome = LevelFile::from_json(CUSTOM_LEVEL)
            .unwrap()
            .replay()
            .unwrap();
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["applied"], 4);
        assert_eq!(json["rejected"][0]["index"], 1);
        assert_eq!(json["report"]["path"][3], serde_json::json!([3, 0]));
    }
}
