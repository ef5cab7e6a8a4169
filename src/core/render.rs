use crate::core::pauli::Stabilizer;
use crate::domain::model::{OutputFormat, UpdateReport};
use crate::utils::error::{FusionError, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct GeneratorRow<'a> {
    index: usize,
    sign: i8,
    pauli: String,
    stabilizer: &'a str,
}

pub fn render(report: &UpdateReport, format: OutputFormat) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_vec_pretty(report)?),
        OutputFormat::Csv => render_delimited(&report.generators, b','),
        OutputFormat::Tsv => render_delimited(&report.generators, b'\t'),
        OutputFormat::Txt => Ok(render_text(&report.generators).into_bytes()),
    }
}

/// One generator per line in display form.
pub fn render_text(generators: &[Stabilizer]) -> String {
    let mut out = String::new();
    for g in generators {
        out.push_str(&g.pretty());
        out.push('\n');
    }
    out
}

fn render_delimited(generators: &[Stabilizer], delimiter: u8) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    for (index, g) in generators.iter().enumerate() {
        let display = g.pretty();
        writer.serialize(GeneratorRow {
            index,
            sign: g.sign.as_int(),
            pauli: g.pauli.to_string(),
            stabilizer: &display,
        })?;
    }

    writer
        .into_inner()
        .map_err(|e| FusionError::IoError(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generators() -> Vec<Stabilizer> {
        vec!["-IZI".parse().unwrap(), "+XII".parse().unwrap()]
    }

    #[test]
    fn test_render_text() {
        assert_eq!(render_text(&generators()), "-IZI\n+XII\n");
    }

    #[test]
    fn test_render_csv_and_tsv() {
        let csv = String::from_utf8(render_delimited(&generators(), b',').unwrap()).unwrap();
        assert_eq!(
            csv,
            "index,sign,pauli,stabilizer\n0,-1,IZI,-IZI\n1,1,XII,+XII\n"
        );

        let tsv = String::from_utf8(render_delimited(&generators(), b'\t').unwrap()).unwrap();
        assert!(tsv.starts_with("index\tsign\tpauli\tstabilizer\n"));
        assert!(tsv.contains("0\t-1\tIZI\t-IZI"));
    }
}
