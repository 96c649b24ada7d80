use geojson_codec::output::{to_string_pretty, Output};
use geojson_codec::{DecodeOptions, GeoJson, DEFAULT_MAX_DEPTH};
use std::error::Error;
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::PathBuf;
use structopt::StructOpt;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(StructOpt, Debug)]
#[structopt(name = "geojson_codec", about = "Decode, check and re-encode a GeoJSON document")]
struct Opt {
    /// Input file, stdin if omitted
    #[structopt(parse(from_os_str))]
    input: Option<PathBuf>,

    /// Maximum nesting of arrays and objects
    #[structopt(long, default_value = "64")]
    max_depth: usize,

    /// Compute a bbox when the document has none
    #[structopt(long)]
    bbox: bool,

    #[structopt(long, conflicts_with = "lines")]
    pretty: bool,

    /// Write one feature per line
    #[structopt(long)]
    lines: bool,

    /// More logging (-v info, -vv debug, -vvv trace); RUST_LOG takes precedence
    #[structopt(short, long, parse(from_occurrences))]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn feature_count(document: &GeoJson) -> usize {
    match document {
        GeoJson::Feature(..) => 1,
        GeoJson::FeatureCollection(collection, _) => collection.len(),
        GeoJson::Geometry(..) => 0,
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let opt = Opt::from_args();
    init_logging(opt.verbose);

    let reader: Box<dyn Read> = match &opt.input {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(io::stdin()),
    };
    if opt.max_depth != DEFAULT_MAX_DEPTH {
        info!(max_depth = opt.max_depth, "custom nesting limit");
    }
    let options = DecodeOptions::default().with_max_depth(opt.max_depth);
    let mut document: GeoJson = options.from_reader(reader)?;
    if opt.bbox {
        document = document.with_computed_bbox();
    }
    info!(
        document_type = document.type_name(),
        features = feature_count(&document),
        bbox = ?document.bbox(),
        "decoded document"
    );

    let stdout = io::stdout();
    let mut writer = stdout.lock();
    if opt.lines {
        document.write_json_lines(&mut writer)?;
    } else if opt.pretty {
        writeln!(writer, "{}", to_string_pretty(&document)?)?;
    } else {
        document.write_geojson(&mut writer)?;
    }
    Ok(())
}
