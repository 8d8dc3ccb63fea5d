use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span};

use karte_cli::pipeline::{
    ConvertOptions, OutputShape, convert_text, join_captures, merge_documents,
};
use karte_model::{NormalizeOptions, SectionCode};
use karte_parse::anonymize;

use crate::cli::{AnonymizeArgs, ConvertArgs, MergeArgs};
use crate::summary::{apply_table_style, print_summary};

pub fn run_convert(args: &ConvertArgs) -> Result<()> {
    let span = info_span!("convert", inputs = args.inputs.len());
    let _guard = span.enter();
    let start = Instant::now();

    let captures = read_inputs(&args.inputs)?;
    let text = join_captures(&captures);
    let options = ConvertOptions {
        shape: if args.flat {
            OutputShape::Flat
        } else {
            OutputShape::Grouped
        },
        normalize: normalize_options(args.strict),
    };
    let conversion = convert_text(&text, &options)?;
    let json = conversion.records.to_json()?;
    write_output(args.output.as_deref(), &json)?;
    info!(
        records = conversion.records.len(),
        duration_ms = start.elapsed().as_millis(),
        "convert complete"
    );
    if args.summary {
        print_summary(&conversion);
    }
    Ok(())
}

pub fn run_merge(args: &MergeArgs) -> Result<()> {
    let span = info_span!("merge", inputs = args.inputs.len());
    let _guard = span.enter();

    let documents = read_inputs(&args.inputs)?;
    let conversion = merge_documents(&documents, &normalize_options(args.strict))?;
    let json = conversion.records.to_json()?;
    write_output(args.output.as_deref(), &json)?;
    if args.summary {
        print_summary(&conversion);
    }
    Ok(())
}

pub fn run_anonymize(args: &AnonymizeArgs) -> Result<()> {
    let inputs: Vec<PathBuf> = args.input.iter().cloned().collect();
    let text = read_inputs(&inputs)?.join("\n");
    let anonymized = anonymize(&text);
    info!(
        redacted_lines = anonymized.redacted_lines,
        "anonymize complete"
    );
    match args.output.as_deref() {
        Some(path) => fs::write(path, &anonymized.text)
            .with_context(|| format!("write {}", path.display()))?,
        None => print!("{}", anonymized.text),
    }
    Ok(())
}

pub fn run_sections() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Code", "Field", "Section"]);
    apply_table_style(&mut table);
    for code in SectionCode::ALL {
        table.add_row(vec![code.as_code(), code.field_name(), code.label()]);
    }
    println!("{table}");
    Ok(())
}

fn normalize_options(strict: bool) -> NormalizeOptions {
    if strict {
        NormalizeOptions::strict()
    } else {
        NormalizeOptions::default()
    }
}

/// Reads every input in order; no paths or `-` means stdin.
fn read_inputs(paths: &[PathBuf]) -> Result<Vec<String>> {
    if paths.is_empty() {
        return Ok(vec![read_stdin()?]);
    }
    paths
        .iter()
        .map(|path| {
            if path.as_os_str() == "-" {
                read_stdin()
            } else {
                fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
            }
        })
        .collect()
}

fn read_stdin() -> Result<String> {
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .context("read stdin")?;
    Ok(text)
}

fn write_output(path: Option<&Path>, json: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, format!("{json}\n"))
                .with_context(|| format!("write {}", path.display()))?;
            info!(path = %path.display(), "output written");
        }
        None => println!("{json}"),
    }
    Ok(())
}
