use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use half::f16;
use sm_matrix::kernel::multiply_ijk;
use sm_matrix::text::{read_pair, write_matrix};
use sm_matrix::{
    DType, Element, LeafSize, Matrix, Multiplier, NaiveMultiplier, StrassenMultiplier,
};

/// Tolerance for `--verify` on float products, relative to the magnitude of
/// each element. Integer products must match exactly.
fn verify_tolerance(dtype: DType) -> f64 {
    match dtype {
        DType::F16 => 1e-2,
        DType::F32 => 1e-4,
        _ => 1e-9,
    }
}

/// Matrix dimension argument: a positive integer, or `auto` to infer it from
/// the first input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeArg(Option<usize>);

impl FromStr for SizeArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("auto") {
            return Ok(SizeArg(None));
        }
        match s.parse::<usize>() {
            Ok(0) => Err("matrix size must be positive".to_string()),
            Ok(n) => Ok(SizeArg(Some(n))),
            Err(e) => Err(format!("invalid matrix size {:?}: {}", s, e)),
        }
    }
}

/// Multiply two square matrices with Strassen's algorithm.
///
/// Reads A then B as whitespace-separated rows from INPUT (or stdin) and
/// prints A * B tab-separated, one row per line.
#[derive(Parser, Debug)]
#[command(name = "strassen", version, about)]
pub struct Cli {
    /// Matrix dimension N, or "auto" to count the values on the first line
    #[arg(value_name = "N")]
    pub size: SizeArg,

    /// Input file; stdin when absent or "-"
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Size at or below which the dense kernel is used; must be a power of two
    #[arg(value_name = "LEAF_SIZE", env = "STRASSEN_LEAF_SIZE")]
    pub leaf_size: Option<String>,

    /// Element type: f16, f32, f64, i32 or i64
    #[arg(long, value_name = "DTYPE", default_value = "f64")]
    pub dtype: DType,

    /// Use the dense kernel only, without Strassen recursion
    #[arg(long)]
    pub naive: bool,

    /// Also compute the dense product and report the largest difference
    #[arg(long)]
    pub verify: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Install the `env_logger` backend. `RUST_LOG` overrides the verbosity flag.
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Resolve the leaf size argument. Anything that is not a power of two is
/// reported and replaced by the default; it never fails the run.
pub fn resolve_leaf_size(raw: Option<&str>) -> LeafSize {
    match raw {
        None => LeafSize::DEFAULT,
        Some(s) => match s.trim().parse::<usize>() {
            Ok(size) => LeafSize::new_or_default(size),
            Err(_) => {
                log::warn!(
                    "invalid leaf size {:?}; using default leaf size {}",
                    s,
                    LeafSize::DEFAULT
                );
                LeafSize::DEFAULT
            }
        },
    }
}

fn open_input(path: Option<&PathBuf>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(p) if p.as_os_str() != "-" => {
            let file = File::open(p)
                .with_context(|| format!("could not read file {}", p.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        _ => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

/// Run one multiplication, writing the product to `out`.
pub fn run<W: Write>(args: &Cli, out: W) -> Result<()> {
    match args.dtype {
        DType::F16 => run_typed::<f16, W>(args, out),
        DType::F32 => run_typed::<f32, W>(args, out),
        DType::F64 => run_typed::<f64, W>(args, out),
        DType::I32 => run_typed::<i32, W>(args, out),
        DType::I64 => run_typed::<i64, W>(args, out),
    }
}

fn run_typed<T, W>(args: &Cli, out: W) -> Result<()>
where
    T: Element + FromStr + Display,
    W: Write,
{
    let leaf = resolve_leaf_size(args.leaf_size.as_deref());

    let reader = open_input(args.input.as_ref())?;
    let (a, b) = read_pair::<T, _>(reader, args.size.0).context("error reading input data")?;
    let n = a.dim();

    let multiplier: Box<dyn Multiplier<T>> = if args.naive {
        Box::new(NaiveMultiplier::new())
    } else {
        Box::new(StrassenMultiplier::new(leaf))
    };
    log::info!(
        "multiplying {}x{} {} matrices with {} (leaf size {})",
        n,
        n,
        a.dtype(),
        multiplier.name(),
        leaf
    );

    let start = Instant::now();
    let c = multiplier.multiply(&a, &b)?;
    log::info!("{} finished in {:.3?}", multiplier.name(), start.elapsed());

    if args.verify {
        verify(&a, &b, &c)?;
    }

    write_matrix(out, &c).context("error writing result")?;
    Ok(())
}

fn verify<T: Element>(a: &Matrix<T>, b: &Matrix<T>, c: &Matrix<T>) -> Result<()> {
    let n = a.dim();
    let mut reference = vec![T::zero(); n * n];
    multiply_ijk(a.as_slice(), b.as_slice(), &mut reference, n);
    let reference = Matrix::from_vec(n, reference)?;

    let dtype = c.dtype();
    let diff = c.max_abs_diff(&reference).unwrap_or(f64::INFINITY);
    let matches = if dtype.is_float() {
        c.approx_eq(&reference, verify_tolerance(dtype))
    } else {
        *c == reference
    };
    if matches {
        log::info!("verification passed (max abs diff {:e})", diff);
        Ok(())
    } else {
        anyhow::bail!("verification failed: max abs diff {:e} against the dense product", diff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    fn input_file(contents: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    fn run_to_string(args: &[&str]) -> Result<String> {
        let cli = Cli::try_parse_from(args).unwrap();
        let mut out = Vec::new();
        run(&cli, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_parse_positional() {
        let cli = Cli::try_parse_from(["strassen", "4", "m.txt", "16", "--verify"]).unwrap();
        assert_eq!(cli.size, SizeArg(Some(4)));
        assert_eq!(cli.input, Some(PathBuf::from("m.txt")));
        assert_eq!(cli.leaf_size.as_deref(), Some("16"));
        assert!(cli.verify);
        assert!(!cli.naive);
        assert_eq!(cli.dtype, DType::F64);
    }

    #[test]
    fn test_parse_dtype() {
        let cli = Cli::try_parse_from(["strassen", "2", "--dtype", "I32"]).unwrap();
        assert_eq!(cli.dtype, DType::I32);
        let err = Cli::try_parse_from(["strassen", "2", "--dtype", "q8"]).unwrap_err();
        assert!(err.to_string().contains("unsupported dtype"));
    }

    #[test]
    fn test_parse_auto_and_verbosity() {
        let cli = Cli::try_parse_from(["strassen", "auto", "-vv"]).unwrap();
        assert_eq!(cli.size, SizeArg(None));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_parse_rejects_zero_size() {
        assert!(Cli::try_parse_from(["strassen", "0"]).is_err());
        assert!(Cli::try_parse_from(["strassen", "abc"]).is_err());
    }

    #[test]
    fn test_resolve_leaf_size() {
        assert_eq!(resolve_leaf_size(None), LeafSize::DEFAULT);
        assert_eq!(resolve_leaf_size(Some("8")).get(), 8);
        assert_eq!(resolve_leaf_size(Some("48")), LeafSize::DEFAULT);
        assert_eq!(resolve_leaf_size(Some("0")), LeafSize::DEFAULT);
        assert_eq!(resolve_leaf_size(Some("lots")), LeafSize::DEFAULT);
    }

    #[test]
    fn test_run_2x2() {
        let f = input_file("1\t2\n3\t4\n\n5\t6\n7\t8\n");
        let path = f.path().to_str().unwrap();
        let out = run_to_string(&["strassen", "2", path, "1"]).unwrap();
        assert_eq!(out, "19\t22\n43\t50\n");
    }

    #[test]
    fn test_run_autodetect_odd_size() {
        let f = input_file("1 2 3\n4 5 6\n7 8 9\n9 8 7\n6 5 4\n3 2 1\n");
        let path = f.path().to_str().unwrap();
        let out = run_to_string(&["strassen", "auto", path, "1", "--verify"]).unwrap();
        assert_eq!(out, "30\t24\t18\n84\t69\t54\n138\t114\t90\n");
    }

    #[test]
    fn test_run_naive_matches() {
        let f = input_file("2 0\n0 2\n1.5 -1\n4 0.25\n");
        let path = f.path().to_str().unwrap();
        let strassen = run_to_string(&["strassen", "2", path, "1"]).unwrap();
        let naive = run_to_string(&["strassen", "2", path, "--naive"]).unwrap();
        assert_eq!(strassen, naive);
        assert_eq!(naive, "3\t-2\n8\t0.5\n");
    }

    #[test]
    fn test_run_invalid_leaf_size_continues() {
        let f = input_file("1 2\n3 4\n5 6\n7 8\n");
        let path = f.path().to_str().unwrap();
        let out = run_to_string(&["strassen", "2", path, "3"]).unwrap();
        assert_eq!(out, "19\t22\n43\t50\n");
    }

    #[test]
    fn test_run_short_input_fails() {
        let f = input_file("1 2\n3 4\n5 6\n");
        let path = f.path().to_str().unwrap();
        let err = run_to_string(&["strassen", "2", path]).unwrap_err();
        assert!(format!("{:#}", err).contains("short input for matrix B"));
    }

    #[test]
    fn test_run_integer_dtype() {
        let f = input_file("1 2\n3 4\n5 6\n7 8\n");
        let path = f.path().to_str().unwrap();
        let out = run_to_string(&["strassen", "2", path, "1", "--dtype", "i64", "--verify"]).unwrap();
        assert_eq!(out, "19\t22\n43\t50\n");
    }

    #[test]
    fn test_run_integer_rejects_fractions() {
        let f = input_file("1 2\n3 4.5\n5 6\n7 8\n");
        let path = f.path().to_str().unwrap();
        let err = run_to_string(&["strassen", "2", path, "--dtype", "i32"]).unwrap_err();
        assert!(format!("{:#}", err).contains("cannot parse \"4.5\""));
    }

    #[test]
    fn test_run_i32_intermediate_overflow() {
        let f = input_file("1073741824 0\n0 1073741824\n1 0\n0 1\n");
        let path = f.path().to_str().unwrap();
        let out = run_to_string(&["strassen", "2", path, "1", "--dtype", "i32", "--verify"]).unwrap();
        assert_eq!(out, "1073741824\t0\n0\t1073741824\n");
    }

    #[test]
    fn test_run_f32_dtype() {
        let f = input_file("2 0\n0 2\n1.5 -1\n4 0.25\n");
        let path = f.path().to_str().unwrap();
        let out = run_to_string(&["strassen", "2", path, "1", "--dtype", "f32", "--verify"]).unwrap();
        assert_eq!(out, "3\t-2\n8\t0.5\n");
    }

    #[test]
    fn test_run_huge_size_fails() {
        let f = input_file("1 2\n3 4\n5 6\n7 8\n");
        let path = f.path().to_str().unwrap();
        let size = (1usize << (usize::BITS / 2 + 1)).to_string();
        let err = run_to_string(&["strassen", size.as_str(), path]).unwrap_err();
        assert!(format!("{:#}", err).contains("too large"));
    }

    #[test]
    fn test_run_missing_file_fails() {
        let err = run_to_string(&["strassen", "2", "/nonexistent/matrix.txt"]).unwrap_err();
        assert!(err.to_string().contains("could not read file"));
    }
}
