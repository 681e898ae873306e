#[cfg(test)]
mod tests {
    use std::num::NonZero;

    use strum::VariantArray;

    use crate::board::Board;
    use crate::builder::{BoardBuilder, BuilderInvalidReason};
    use crate::cell::{Cell, WALL};
    use crate::connectivity::ConnectivityError;
    use crate::direction::{Direction, InvalidDirection};
    use crate::location::Location;
    use crate::logic::Connection;
    use crate::shape::Shape;
    use crate::solver::{Neighborhood, SweepOptions, COMMON_BASE, INDIRECT_LOOP};

    fn board(text: &str) -> Board {
        BoardBuilder::from_glyphs(text, false).build().unwrap()
    }

    fn connections(board: &Board) -> Vec<Connection> {
        board.locations()
            .flat_map(|location| Direction::VARIANTS.iter().map(move |side| (location, *side)))
            .map(|(location, side)| board.has_connection(location, side))
            .collect()
    }

    #[test]
    fn direction_group_laws() {
        for a in Direction::VARIANTS.iter().copied() {
            assert_eq!(a.rotate_clockwise(4), a);
            assert_eq!(a.rotate_counterclockwise(4), a);
            assert_eq!(a.opposite().opposite(), a);
            assert_eq!(a.rotate_clockwise(2), a.opposite());
            for b in Direction::VARIANTS.iter().copied() {
                assert_eq!((a.rotations_from_clockwise(b) + b.rotations_from_clockwise(a)) % 4, 0);
                assert_eq!(a.rotate_clockwise(a.rotations_from_clockwise(b)), b);
                assert_eq!(a.rotate_counterclockwise(a.rotations_from_counterclockwise(b)), b);
            }
        }

        assert_eq!(Direction::Up.rotate_clockwise(1), Direction::Right);
        assert_eq!(Direction::Up.rotate_counterclockwise(1), Direction::Left);
        assert_eq!(Direction::Up.rotations_from_clockwise(Direction::Left), 3);
        assert_eq!(Direction::Up.rotations_from_counterclockwise(Direction::Left), 1);
        assert_eq!(Direction::Down.rotations_from_counterclockwise(Direction::Down), 0);
    }

    #[test]
    fn invalid_directions() {
        assert_eq!("up".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!("LEFT".parse::<Direction>(), Ok(Direction::Left));
        assert_eq!("NORTH".parse::<Direction>(), Err(InvalidDirection("NORTH".to_owned())));
        assert_eq!(Direction::try_from(2usize), Ok(Direction::Down));
        assert_eq!(Direction::try_from(4usize), Err(InvalidDirection("4".to_owned())));
    }

    #[test]
    fn pinned_outlet_counts() {
        let expected = [(Shape::Endpoint, 1), (Shape::Line, 2), (Shape::Elbow, 2), (Shape::ThreeWay, 3)];
        for (shape, outlets) in expected {
            for facing in Direction::VARIANTS.iter().copied() {
                let cell = Cell::new(shape, facing, true);
                let connected = Direction::VARIANTS.iter()
                    .filter(|side| cell.own_connection(**side) == Connection::Connected)
                    .count();
                let blocked = Direction::VARIANTS.iter()
                    .filter(|side| cell.own_connection(**side) == Connection::Blocked)
                    .count();
                assert_eq!((connected, blocked), (outlets, 4 - outlets), "{shape} facing {facing}");
            }
        }

        let line = Cell::new(Shape::Line, Direction::Left, true);
        assert_eq!(line.own_connection(Direction::Left), Connection::Connected);
        assert_eq!(line.own_connection(Direction::Right), Connection::Connected);
        let elbow = Cell::new(Shape::Elbow, Direction::Down, true);
        assert_eq!(elbow.own_connection(Direction::Up), Connection::Connected);
        assert_eq!(elbow.own_connection(Direction::Right), Connection::Connected);
        let three_way = Cell::new(Shape::ThreeWay, Direction::Down, true);
        assert_eq!(three_way.own_connection(Direction::Up), Connection::Blocked);

        for side in Direction::VARIANTS.iter().copied() {
            assert_eq!(WALL.own_connection(side), Connection::Blocked);
            assert_eq!(Cell::new(Shape::ThreeWay, side, false).own_connection(side), Connection::Unknown);
        }
    }

    #[test]
    fn unpinned_elbow_reads_across() {
        let board = board("━*┗┳\n");

        // the pinned line feeds the elbow from the left, so it cannot also open right
        assert_eq!(board.has_connection(Location(1, 0), Direction::Right), Connection::Blocked);
        // the wall below forces the vertical outlet up
        assert_eq!(board.has_connection(Location(1, 0), Direction::Up), Connection::Connected);
        // nothing pinned to the right
        assert_eq!(board.has_connection(Location(1, 0), Direction::Left), Connection::Unknown);
        // unpinned three-ways know nothing
        assert_eq!(board.has_connection(Location(2, 0), Direction::Left), Connection::Unknown);
    }

    #[test]
    fn pinned_cells_are_left_alone() {
        let mut board = board("╺*┃╸\n");
        let before = *board.cell(Location(0, 0)).unwrap();

        assert_eq!(board.attempt_solve(Location(0, 0)), Ok(None));
        assert_eq!(*board.cell(Location(0, 0)).unwrap(), before);
    }

    #[test]
    fn line_follows_endpoint() {
        let mut board = board("╺*┃╸\n");

        assert_eq!(board.rotations_needed_to_face(Location(1, 0), Direction::Left), Ok(1));
        assert_eq!(board.attempt_solve(Location(1, 0)), Ok(Some(Direction::Left)));
        assert!(board.cell(Location(1, 0)).unwrap().is_pinned());
        assert_eq!(board.stringify("\n"), "╺━╸\n");
    }

    #[test]
    fn line_turns_off_walls() {
        // no pins at all; the walls above and below settle it
        let mut board = board("╻┃╸\n");

        let facing = board.attempt_solve(Location(1, 0)).unwrap().unwrap();
        assert!(facing.is_parallel_to(Direction::Left));
    }

    #[test]
    fn line_avoids_endpoint_island() {
        let mut board = board("┳┳┳
╻┃╻
┳┳┳
");

        assert_eq!(board.attempt_solve(Location(1, 1)), Ok(Some(Direction::Down)));
        assert_eq!(board.stringify("\n"), "┳┳┳
╻┃╻
┳┳┳
");
    }

    #[test]
    fn endpoint_follows_connection() {
        let mut board = board("┳┳┳
┳╻━*
┳┳┳
");

        assert_eq!(board.attempt_solve(Location(1, 1)), Ok(Some(Direction::Right)));
    }

    #[test]
    fn endpoints_never_face_each_other() {
        let mut board = board("╻╸\n┻┻\n");

        let facing = board.attempt_solve(Location(0, 0)).unwrap();
        assert_eq!(facing, Some(Direction::Down));
        assert_ne!(facing, Some(Direction::Right));
    }

    #[test]
    fn endpoint_pair_is_whole_grid() {
        let mut board = board("╻╸\n");

        assert_eq!(board.attempt_solve(Location(0, 0)), Ok(Some(Direction::Right)));
        assert_eq!(board.attempt_solve(Location(1, 0)), Ok(Some(Direction::Left)));
        assert!(board.is_solved());
    }

    #[test]
    fn three_way_faces_away_from_blocked() {
        let mut board = board("┳╹*┳
┳┣┳
┳┳┳
");

        assert_eq!(board.attempt_solve(Location(1, 1)), Ok(Some(Direction::Down)));
        assert_eq!(board.cell(Location(1, 1)).unwrap().to_string(), "┳");
    }

    #[test]
    fn three_way_with_three_connected() {
        let mut board = board("┳┃*┳
━*┳━*
┳┳┳
");

        assert_eq!(board.attempt_solve(Location(1, 1)), Ok(Some(Direction::Up)));
        assert_eq!(board.cell(Location(1, 1)).unwrap().to_string(), "┻");
    }

    #[test]
    fn elbow_with_two_connected() {
        let mut board = board("┳┃*┳
┳┏━*
┳┳┳
");

        assert_eq!(board.attempt_solve(Location(1, 1)), Ok(Some(Direction::Down)));
        assert_eq!(board.cell(Location(1, 1)).unwrap().to_string(), "┗");
    }

    #[test]
    fn elbow_in_corner() {
        let mut board = board("┗┳\n┳┳\n");

        assert_eq!(board.attempt_solve(Location(0, 0)), Ok(Some(Direction::Left)));
        assert_eq!(board.cell(Location(0, 0)).unwrap().to_string(), "┏");
    }

    #[test]
    fn elbow_connected_beside_blocked() {
        let mut board = board("┳┃*┳
┳┏┃*
┳┳┳
");

        assert_eq!(board.attempt_solve(Location(1, 1)), Ok(Some(Direction::Right)));
        assert_eq!(board.cell(Location(1, 1)).unwrap().to_string(), "┛");
    }

    #[test]
    fn elbow_avoids_closing_square() {
        // the elbow at (1, 1) already reaches the one at (2, 1) through the pinned base below them
        let mut board = board("┳┳┳┳
┳┗┗┳
┳┗*┛*┳
");

        assert_eq!(board.is_connected_to(Location(1, 2), Location(2, 2)), Ok(true));
        assert_eq!(board.is_connected_to(Location(1, 1), Location(2, 1)), Ok(true));
        assert_eq!(board.is_connected_to(Location(1, 1), Location(0, 0)), Ok(false));

        assert_eq!(board.attempt_solve(Location(1, 1)), Ok(Some(Direction::Up)));
        assert_eq!(board.cell(Location(1, 1)).unwrap().to_string(), "┓");
        assert_eq!(board.has_connection(Location(1, 1), Direction::Right), Connection::Blocked);
    }

    #[test]
    fn common_base_alone() {
        let elbows = board("┳┳┳┳\n┳┗┗┳\n┳┗*┛*┳\n");
        let around = Neighborhood::of(&elbows, Location(1, 1), Shape::Elbow);
        assert_eq!((COMMON_BASE.apply)(&around), Some(Direction::Up));

        let three_ways = board("┳┳┳┳\n┳┳┳┳\n┳┗*┛*┳\n");
        let around = Neighborhood::of(&three_ways, Location(1, 1), Shape::ThreeWay);
        assert_eq!((COMMON_BASE.apply)(&around), Some(Direction::Left));

        // the pinned piece under (2, 1) turns away, so there is no base to share
        let open = board("┳┳┳┳\n┳┗┗┳\n┳┗*┏*┳\n");
        let around = Neighborhood::of(&open, Location(1, 1), Shape::Elbow);
        assert_eq!((COMMON_BASE.apply)(&around), None);
    }

    #[test]
    fn three_way_avoids_long_loop() {
        let mut board = board("┳┳┳┳
┳┳┳┓*
┳┗*━*┛*
");

        assert_eq!(board.is_connected_to(Location(1, 1), Location(2, 1)), Ok(true));
        assert_eq!(board.attempt_solve(Location(1, 1)), Ok(Some(Direction::Left)));
        assert_eq!(board.cell(Location(1, 1)).unwrap().to_string(), "┫");
    }

    #[test]
    fn contradictory_pins_are_reported() {
        let board = board("┏*┓*┳
┗*┛*┳
");

        assert!(matches!(
            board.is_connected_to(Location(0, 0), Location(2, 0)),
            Err(ConnectivityError::LoopDetected { .. })
        ));
        assert!(!board.is_solved());
    }

    #[test]
    fn loop_check_gives_up_on_contradictory_pins() {
        let board = board("┏*┓*\n┗*┫*\n┳┳\n");

        assert_eq!(
            board.is_connected_to(Location(1, 2), Location(0, 2)),
            Err(ConnectivityError::LoopDetected { at: Location(1, 0) })
        );
        let around = Neighborhood::of(&board, Location(1, 2), Shape::ThreeWay);
        assert_eq!((INDIRECT_LOOP.apply)(&around), None);
    }

    #[test]
    fn narrow_wrap_seams_are_distinct() {
        let ring = BoardBuilder::from_glyphs("━*━*\n", true).build().unwrap();
        assert!(!ring.is_solved());

        let ring = BoardBuilder::from_glyphs("━*━*\n┳┳\n", true).build().unwrap();
        assert!(matches!(
            ring.is_connected_to(Location(0, 0), Location(0, 1)),
            Err(ConnectivityError::LoopDetected { .. })
        ));
    }

    #[test]
    fn wrapping_neighbors() {
        let wrapped = BoardBuilder::from_glyphs("┳┳┳\n┳┳┳\n┳┳┳\n", true).build().unwrap();
        assert_eq!(wrapped.neighbor(Location(0, 0), Direction::Up), Some(Location(0, 2)));
        assert_eq!(wrapped.neighbor(Location(0, 0), Direction::Left), Some(Location(2, 0)));
        assert_eq!(wrapped.neighbor(Location(2, 2), Direction::Right), Some(Location(0, 2)));
        assert_eq!(wrapped.neighbor(Location(2, 2), Direction::Down), Some(Location(2, 0)));

        let bounded = board("┳┳┳\n┳┳┳\n┳┳┳\n");
        assert_eq!(bounded.neighbor(Location(0, 0), Direction::Up), None);
        assert_eq!(bounded.neighbor(Location(2, 2), Direction::Right), None);
        assert_eq!(bounded.neighbor(Location(1, 1), Direction::Down), Some(Location(1, 2)));
    }

    #[test]
    fn sweep_solves_small_grid() {
        let mut board = board("╹╸\n┏┓\n");

        let report = board.solve_all(SweepOptions::default());
        assert!(report.complete);
        assert_eq!(report.passes, 2);
        assert_eq!(report.steps.iter().map(|step| (step.location, step.rotations)).collect::<Vec<_>>(), vec![
            (Location(0, 0), 2),
            (Location(1, 0), 3),
            (Location(0, 1), 3),
            (Location(1, 1), 1),
        ]);
        assert_eq!(format!("{}", board), "╻╻
┗┛
");
        assert!(board.is_solved());
    }

    #[test]
    fn sweep_stalls_quietly() {
        let mut board = BoardBuilder::from_glyphs("┳┳┳\n┳┳┳\n┳┳┳\n", true).build().unwrap();

        let report = board.solve_all(SweepOptions { max_passes: Some(5) });
        assert!(!report.complete);
        assert!(report.steps.is_empty());
        assert_eq!(report.passes, 1);
    }

    #[test]
    fn rendering_round_trip() {
        let mut original = board("╺*┃*┓*\n┣*━*┻*\n");
        original.notify(Location(1, 0), Direction::Up, true).unwrap();

        let rendered = original.stringify("\n");
        assert_eq!(rendered, "╺┃┓\n┣━┻\n");

        let pinned_text: String = rendered.chars()
            .flat_map(|c| if c == '\n' { vec![c] } else { vec![c, '*'] })
            .collect();
        let reparsed = board(&pinned_text);
        assert_eq!(connections(&reparsed), connections(&original));
    }

    #[test]
    fn line_rotations_are_halved() {
        let board = board("┃╻\n");

        assert_eq!(board.rotations_needed_to_face(Location(0, 0), Direction::Up), Ok(0));
        assert_eq!(board.rotations_needed_to_face(Location(0, 0), Direction::Left), Ok(1));
        assert_eq!(board.rotations_needed_to_face(Location(1, 0), Direction::Up), Ok(2));
        assert!(board.rotations_needed_to_face(Location(2, 0), Direction::Up).is_err());
    }

    #[test]
    fn notify_touches_facing_and_pin_only() {
        let mut board = board("┃╻\n");

        board.notify(Location(1, 0), Direction::Left, true).unwrap();
        assert_eq!(*board.cell(Location(1, 0)).unwrap(), Cell::new(Shape::Endpoint, Direction::Left, true));
        assert!(board.notify(Location(0, 3), Direction::Left, true).is_err());
    }

    #[test]
    fn page_classes() {
        let mut builder = BoardBuilder::with_dims((NonZero::new(3).unwrap(), NonZero::new(1).unwrap()));
        builder
            .add_classes("cell pipe7 cell-2 pinned")
            .add_classes("cell pipe1 cell-3")
            .add_classes("pipe5 cell-0");
        let board = builder.build().unwrap();

        assert_eq!(*board.cell(Location(0, 0)).unwrap(), Cell::new(Shape::ThreeWay, Direction::Down, true));
        assert_eq!(*board.cell(Location(1, 0)).unwrap(), Cell::new(Shape::Endpoint, Direction::Down, false));
        assert_eq!(*board.cell(Location(2, 0)).unwrap(), Cell::new(Shape::Line, Direction::Left, false));
    }

    #[test]
    fn builder_rejects_bad_input() {
        let mut unknown = BoardBuilder::with_dims((NonZero::new(1).unwrap(), NonZero::new(1).unwrap()));
        unknown.add_classes("cell pipe15 cell-0");
        assert_eq!(unknown.build().unwrap_err(), &vec![BuilderInvalidReason::UnrecognizedCellType {
            code: "cell pipe15 cell-0".to_owned(),
        }]);

        let mut no_rotation = BoardBuilder::with_dims((NonZero::new(1).unwrap(), NonZero::new(1).unwrap()));
        no_rotation.add_classes("cell pipe3");
        assert!(no_rotation.is_valid().is_some());

        let mut short = BoardBuilder::with_dims((NonZero::new(2).unwrap(), NonZero::new(2).unwrap()));
        short.add_glyph('╻', false);
        assert_eq!(short.build().unwrap_err(), &vec![BuilderInvalidReason::GridSizeMismatch { expected: 4, found: 1 }]);

        // the cell count alone would fit a 2 by 3 grid
        let mut ragged = BoardBuilder::from_glyphs("╻╻\n┗┛┗\n┗\n", false);
        assert_eq!(ragged.build().unwrap_err(), &vec![BuilderInvalidReason::RaggedRow { row: 1, expected: 2, found: 3 }]);

        let mut wall = BoardBuilder::with_dims((NonZero::new(1).unwrap(), NonZero::new(1).unwrap()));
        wall.add_cell(Shape::Wall, Direction::Down, true);
        assert_eq!(wall.build().unwrap_err(), &vec![BuilderInvalidReason::WallInGrid]);

        let mut outside = BoardBuilder::with_dims((NonZero::new(1).unwrap(), NonZero::new(1).unwrap()));
        outside
            .add_glyph('╻', false)
            .replace(Location(1, 0), Shape::Line, Direction::Down, false);
        assert_eq!(outside.build().unwrap_err(), &vec![BuilderInvalidReason::CellOutOfBounds { location: Location(1, 0) }]);
    }
}
