use clap::{Parser as ClapParser, ValueEnum};
use deb558lib::{
    config::InputEncoding,
    error::{Deb558Error, Result},
    layout::Shape,
    model::{JournalEntry, Record},
    Parser, ParserConfig,
};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Fmt {
    /// Every record as a JSON array
    Json,
    /// Journal entries only, one CSV row each
    Csv,
    /// Record counts and balances
    Summary,
}

#[derive(ClapParser, Debug)]
#[command(name = "deb558", version, about = "Decode Banco do Brasil DEB558 statement extracts")]
struct Cli {
    /// Input file (stdin by default)
    #[arg(short = 'i', long = "input")]
    input: Option<String>,

    /// Output file (stdout by default)
    #[arg(short = 'o', long = "output")]
    output: Option<String>,

    #[arg(long = "format", value_enum, default_value = "json")]
    format: Fmt,

    /// Fail on non-numeric integer fields instead of reading them as zero
    #[arg(long)]
    strict: bool,

    /// Read the input as Latin-1 even when it is valid UTF-8
    #[arg(long)]
    latin1: bool,
}

#[derive(serde::Serialize)]
struct CsvEntryRow<'a> {
    agencia: &'a str,
    conta: &'a str,
    data_lancamento: Option<String>,
    data_balancete: Option<String>,
    categoria: &'a str,
    historico: &'a str,
    documento: i64,
    valor: String,
}

impl<'a> From<&'a JournalEntry> for CsvEntryRow<'a> {
    fn from(e: &'a JournalEntry) -> Self {
        Self {
            agencia: &e.account.prefixo_agencia,
            conta: &e.account.numero_conta_cliente,
            data_lancamento: e.data_lancamento.map(|d| d.format("%Y-%m-%d").to_string()),
            data_balancete: e.data_balancete.map(|d| d.format("%Y-%m-%d").to_string()),
            categoria: &e.categoria_lancamento,
            historico: &e.literal_codigo_numerico,
            documento: e.numero_documento,
            valor: e.valor_lancamento.to_string(),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let encoding = if cli.latin1 {
        InputEncoding::Latin1
    } else {
        InputEncoding::Detect
    };
    let parser = Parser::new(
        ParserConfig::default()
            .with_strict_integers(cli.strict)
            .with_encoding(encoding),
    )?;

    let records = match &cli.input {
        Some(path) => parser.parse_file(path)?,
        None => parser.read(io::stdin().lock())?,
    };
    tracing::info!(records = records.len(), "extract decoded");

    let mut writer: Box<dyn Write> = match cli.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };

    match cli.format {
        Fmt::Json => write_json(&mut writer, &records),
        Fmt::Csv => write_csv(&mut writer, &records),
        Fmt::Summary => write_summary(&mut writer, &records),
    }?;

    writer.flush().map_err(Deb558Error::from)
}

fn write_json<W: Write>(w: W, records: &[Record]) -> Result<()> {
    serde_json::to_writer_pretty(w, records).map_err(io::Error::from)?;
    Ok(())
}

fn write_csv<W: Write>(w: W, records: &[Record]) -> Result<()> {
    let mut wrt = csv::Writer::from_writer(w);
    for record in records {
        if let Record::JournalEntry(e) = record {
            wrt.serialize(CsvEntryRow::from(e)).map_err(io::Error::from)?;
        }
    }
    wrt.flush()?;
    Ok(())
}

fn write_summary<W: Write>(mut w: W, records: &[Record]) -> Result<()> {
    let mut counts: BTreeMap<&'static str, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(record.shape().name()).or_default() += 1;
    }
    for shape in Shape::ALL {
        writeln!(w, "{:<17} {}", shape.name(), counts.get(shape.name()).copied().unwrap_or(0))?;
    }

    for record in records {
        match record {
            Record::PreviousBalance(b) => writeln!(
                w,
                "saldo anterior    {} {} ({})",
                b.account.numero_conta_cliente,
                b.saldo_anterior,
                fmt_date(b.data_saldo_anterior)
            )?,
            Record::CurrentBalance(b) => writeln!(
                w,
                "saldo atual       {} {} ({})",
                b.account.numero_conta_cliente,
                b.saldo_atual,
                fmt_date(b.data_saldo_atual)
            )?,
            _ => {}
        }
    }
    Ok(())
}

fn fmt_date(d: Option<chrono::NaiveDate>) -> String {
    d.map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "sem data".into())
}
