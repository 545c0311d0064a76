mod common;

use std::fs;

use camino::Utf8Path;
use common::{split_row, FailingConeSearch, StaticConeSearch, VEGA_RESPONSE};
use starmags::{
    catalogs::output_header_labels, CatalogMatchSet, CatalogTable, EnrichConfig, Enricher,
    InputTable, StarmagsError,
};

fn quiet() -> EnrichConfig {
    EnrichConfig {
        show_progress: false,
        ..Default::default()
    }
}

#[test]
fn test_enrich_file_row_count_and_prefix() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("subset_output.txt");
    let output = Utf8Path::from_path(&output).unwrap();

    let service = StaticConeSearch::from_tsv(VEGA_RESPONSE);
    let enricher = Enricher::new(&service, quiet());
    let summary = enricher
        .enrich_file(Utf8Path::new("tests/data/subset.txt"), output)
        .unwrap();

    let input_text = fs::read_to_string("tests/data/subset.txt").unwrap();
    let output_text = fs::read_to_string(output).unwrap();
    let input_lines: Vec<&str> = input_text.lines().collect();
    let output_lines: Vec<&str> = output_text.lines().collect();

    assert_eq!(summary.rows_written, 3);
    assert_eq!(summary.rows_matched, 3);
    assert_eq!(output_lines.len(), input_lines.len());

    assert_eq!(
        output_lines[0],
        format!("{},{}", input_lines[0], output_header_labels().join(","))
    );

    for (input_line, output_line) in input_lines.iter().zip(&output_lines).skip(1) {
        assert!(output_line.starts_with(&format!("{input_line},")));
        assert_eq!(
            split_row(output_line).len(),
            split_row(input_line).len() + 16
        );
    }

    let queries = service.queries.borrow();
    assert_eq!(queries.len(), 3);
    assert_eq!(queries[1].0.ra, 10.5);
    assert_eq!(queries[1].0.dec, 20.3);
    assert!(queries.iter().all(|(_, radius)| *radius == 3.0));
}

#[test]
fn test_tess_tmag_only() {
    let input = InputTable::from_reader("id,ra,dec\n1,10.5,20.3\n".as_bytes()).unwrap();
    let service = StaticConeSearch::new(CatalogMatchSet::new(vec![CatalogTable::single_row(
        "IV/39/tic82",
        &[("Tmag", "9.876")],
    )]));
    let enricher = Enricher::new(service, quiet());

    let mut out = Vec::new();
    enricher.enrich(&input, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let row = split_row(text.lines().nth(1).unwrap());

    assert_eq!(&row[3..8], &["nan", "nan", "9.876", "nan", "nan"]);
    assert!(row[8..].iter().all(|v| *v == "nan"));
}

#[test]
fn test_end_to_end_example() {
    let input = InputTable::from_reader("id,ra,dec\n1,10.5,20.3\n".as_bytes()).unwrap();
    let enricher = Enricher::new(StaticConeSearch::new(CatalogMatchSet::empty()), quiet());

    let mut out = Vec::new();
    enricher.enrich(&input, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(
        text.lines().nth(1).unwrap(),
        "1,10.5,20.3,nan,nan,nan,nan,nan,nan,nan,nan,nan,nan,nan,nan,nan,nan,nan,nan"
    );
}

#[test]
fn test_failure_keeps_written_rows() {
    let input =
        InputTable::from_reader("id,ra,dec\n1,10.0,10.0\n2,20.0,20.0\n3,30.0,30.0\n".as_bytes())
            .unwrap();
    let service = FailingConeSearch::new(1);
    let enricher = Enricher::new(&service, quiet());

    let mut out = Vec::new();
    let err = enricher.enrich(&input, &mut out).unwrap_err();
    assert!(matches!(err, StarmagsError::VizierParseError(_)));
    assert_eq!(service.calls.get(), 2);

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("1,10.0,10.0,nan"));
}

#[test]
fn test_invalid_declination_aborts() {
    let input = InputTable::from_reader("ra,dec\n10.0,95.0\n".as_bytes()).unwrap();
    let service = StaticConeSearch::new(CatalogMatchSet::empty());
    let enricher = Enricher::new(&service, quiet());

    let mut out = Vec::new();
    assert_eq!(
        enricher.enrich(&input, &mut out),
        Err(StarmagsError::InvalidCoordinate {
            ra: 10.0,
            dec: 95.0
        })
    );
    assert!(service.queries.borrow().is_empty());
}

#[test]
fn test_missing_input_column_creates_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.txt");
    fs::write(&input, "id,ra\n1,10.5\n").unwrap();
    let output = dir.path().join("bad_output.txt");

    let enricher = Enricher::new(StaticConeSearch::new(CatalogMatchSet::empty()), quiet());
    let result = enricher.enrich_file(
        Utf8Path::from_path(&input).unwrap(),
        Utf8Path::from_path(&output).unwrap(),
    );

    assert_eq!(result, Err(StarmagsError::MissingColumn("dec".into())));
    assert!(!output.exists());
}
