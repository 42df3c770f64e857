use crate::grid::{
    cell::{CellKind, CellLegend},
    error::{ErrorKind, GridError},
    ids::Coordinate,
    layout::GridSpec,
    tests::CLIFF_MAP,
};

#[test]
fn cliff_map_parses_into_expected_kinds() {
    let grid = GridSpec::parse(&CLIFF_MAP).expect("cliff map should parse");

    assert_eq!(grid.shape(), (4, 12));
    assert_eq!(grid.start(), Coordinate::new(3, 0));
    assert_eq!(grid.kind(Coordinate::new(3, 11)), Some(CellKind::Goal));
    assert_eq!(grid.kind(Coordinate::new(0, 0)), Some(CellKind::Ordinary));
    assert_eq!(grid.cells_of(CellKind::Hazard).len(), 10);
    assert_eq!(grid.cells_of(CellKind::Goal), vec![Coordinate::new(3, 11)]);
    assert_eq!(grid.code(Coordinate::new(3, 5)), Some('C'));
    assert_eq!(grid.kind(Coordinate::new(4, 0)), None);
}

#[test]
fn ragged_rows_are_rejected() {
    let err = GridSpec::parse(&["SRR", "RR", "RRG"]).expect_err("ragged map should fail");

    assert_eq!(
        err,
        GridError::RaggedRow {
            row: 1,
            expected: 3,
            found: 2
        }
    );
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn missing_start_is_rejected() {
    let err = GridSpec::parse(&["RRG", "RRR"]).expect_err("map without start should fail");
    assert_eq!(err, GridError::MissingStart);
}

#[test]
fn second_start_is_rejected() {
    let err = GridSpec::parse(&["SRG", "RSR"]).expect_err("two starts should fail");
    assert!(matches!(err, GridError::MultipleStarts { .. }));
}

#[test]
fn unknown_code_reports_position() {
    let err = GridSpec::parse(&["SRG", "RXR"]).expect_err("unknown code should fail");
    assert_eq!(
        err,
        GridError::UnknownCellCode {
            code: 'X',
            row: 1,
            col: 1
        }
    );
}

#[test]
fn empty_maps_are_rejected() {
    let no_rows: [&str; 0] = [];
    assert_eq!(GridSpec::parse(&no_rows), Err(GridError::EmptyMap));
    assert_eq!(GridSpec::parse(&[""]), Err(GridError::EmptyMap));
}

#[test]
fn multiple_goals_and_hazards_are_allowed() {
    let grid = GridSpec::parse(&["SFFG", "FHFH", "GFFG"]).expect("lake map should parse");

    assert_eq!(grid.cells_of(CellKind::Goal).len(), 3);
    assert_eq!(grid.cells_of(CellKind::Hazard).len(), 2);
}

#[test]
fn custom_legend_is_honoured() {
    let legend = CellLegend {
        start: 'A',
        goal: 'Z',
        hazard: vec!['#'],
        ordinary: vec![' '],
    };
    let grid = GridSpec::parse_with_legend(&["A #Z"], &legend).expect("custom legend parses");

    assert_eq!(grid.kind(Coordinate::new(0, 1)), Some(CellKind::Ordinary));
    assert_eq!(grid.kind(Coordinate::new(0, 2)), Some(CellKind::Hazard));
    assert_eq!(grid.kind(Coordinate::new(0, 3)), Some(CellKind::Goal));

    let err = GridSpec::parse_with_legend(&["S #Z"], &legend).expect_err("S is not in legend");
    assert!(matches!(err, GridError::UnknownCellCode { code: 'S', .. }));
}

#[test]
fn legend_with_code_in_two_roles_is_rejected() {
    let legend = CellLegend {
        hazard: vec!['C', 'G'],
        ..CellLegend::default()
    };

    let err = GridSpec::parse_with_legend(&["SRG"], &legend).expect_err("G is goal and hazard");
    assert_eq!(err, GridError::DuplicateCellCode { code: 'G' });
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn legend_with_start_code_as_terrain_is_rejected() {
    let legend = CellLegend {
        ordinary: vec!['R', 'S'],
        ..CellLegend::default()
    };

    assert_eq!(
        legend.validate(),
        Err(GridError::DuplicateCellCode { code: 'S' })
    );
    assert!(GridSpec::parse_with_legend(&["SRG"], &legend).is_err());
}

#[test]
fn repeated_code_within_one_role_is_accepted() {
    let legend = CellLegend {
        hazard: vec!['C', 'C'],
        ..CellLegend::default()
    };

    assert_eq!(legend.validate(), Ok(()));
    let grid = GridSpec::parse_with_legend(&["SCG"], &legend).expect("legend is consistent");
    assert_eq!(grid.kind(Coordinate::new(0, 1)), Some(CellKind::Hazard));
}
