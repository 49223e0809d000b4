//! `encode` and `decode` commands.
//!
//! The library works on symbol slices; everything touching the file system
//! lives here.

use std::ffi::OsString;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use haagenti_huffman::{tree_codec, CompressionStats, HuffmanCodec, HuffmanTree};

use crate::config::Config;
use crate::error::{CliError, CliResult};

/// Arguments of an encode run.
#[derive(Debug, Clone)]
pub struct EncodeOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Where to write the tree; defaults to the output path plus the
    /// configured tree extension.
    pub tree: Option<PathBuf>,
    /// Encode with this existing tree instead of building one.
    pub use_tree: Option<PathBuf>,
}

/// Result of an encode run.
#[derive(Debug, Clone)]
pub struct EncodeReport {
    pub tree_path: PathBuf,
    pub input_bytes: u64,
    pub symbol_count: usize,
    pub stats: CompressionStats,
}

/// Arguments of a decode run.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
    pub input: PathBuf,
    pub tree: PathBuf,
    /// Write the text here instead of returning it for stdout.
    pub output: Option<PathBuf>,
    /// Decode exactly this many characters.
    pub symbols: Option<usize>,
}

/// Read a text file line by line, ending every line with `\n`.
///
/// CRLF line endings are normalized and a final newline is always present.
pub fn read_text_lines(path: &Path) -> CliResult<Vec<char>> {
    let file = File::open(path).map_err(|e| CliError::io(path, e))?;
    let mut text = Vec::new();

    for line in BufReader::new(file).lines() {
        let line = line.map_err(|e| CliError::io(path, e))?;
        text.extend(line.chars());
        text.push('\n');
    }

    debug!(path = %path.display(), chars = text.len(), "read input text");
    Ok(text)
}

/// Tree path used when none is given: `<output>.<extension>`.
pub fn default_tree_path(output: &Path, extension: &str) -> PathBuf {
    let mut name = OsString::from(output.as_os_str());
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

/// Compress a text file into a payload file and a tree file.
pub fn encode(options: &EncodeOptions, config: &Config) -> CliResult<EncodeReport> {
    let text = read_text_lines(&options.input)?;
    let input_bytes = std::fs::metadata(&options.input)
        .map(|m| m.len())
        .map_err(|e| CliError::io(&options.input, e))?;
    let codec = HuffmanCodec::with_policy(config.policy());

    let encoded = match &options.use_tree {
        Some(path) => {
            let tree = read_tree(path)?;
            codec.encode_with_tree(&text, &tree)?
        }
        None => codec.encode(&text)?,
    };

    let tree_path = options
        .tree
        .clone()
        .unwrap_or_else(|| default_tree_path(&options.output, &config.tree_extension));

    // A payload is useless without its tree
    write_file(&options.output, &encoded.payload)?;
    if let Err(err) = write_file(&tree_path, &encoded.tree) {
        if let Err(cleanup) = std::fs::remove_file(&options.output) {
            warn!(
                payload = %options.output.display(),
                error = %cleanup,
                "could not remove payload"
            );
        }
        return Err(err);
    }

    info!(
        input = %options.input.display(),
        payload = %options.output.display(),
        tree = %tree_path.display(),
        "encoded"
    );
    info!(
        "  {} chars ({} distinct) -> {} bits, {} payload bytes + {} tree bytes",
        encoded.symbol_count,
        encoded.stats.distinct_symbols,
        encoded.bit_count,
        encoded.stats.payload_bytes,
        encoded.stats.tree_bytes
    );
    info!(
        "  ratio {:.3}, savings {:.1}%, decode exactly with --symbols {}",
        encoded.stats.ratio(input_bytes as usize),
        encoded.stats.savings_percent(input_bytes as usize),
        encoded.symbol_count
    );

    Ok(EncodeReport {
        tree_path,
        input_bytes,
        symbol_count: encoded.symbol_count,
        stats: encoded.stats,
    })
}

/// Decompress a payload file with its tree file.
///
/// Writes the text to `options.output` when set and returns it either way.
/// Without `symbols` every payload bit is decoded, padding included.
pub fn decode(options: &DecodeOptions) -> CliResult<String> {
    let payload = std::fs::read(&options.input).map_err(|e| CliError::io(&options.input, e))?;
    let tree = std::fs::read(&options.tree).map_err(|e| CliError::io(&options.tree, e))?;
    let codec = HuffmanCodec::<char>::new();

    let symbols = match options.symbols {
        Some(count) => codec.decode_exact(&payload, &tree, count)?,
        None => codec.decode(&payload, &tree)?,
    };
    let text: String = symbols.into_iter().collect();

    if let Some(path) = &options.output {
        write_file(path, text.as_bytes())?;
        info!(output = %path.display(), chars = text.chars().count(), "decoded");
    }

    Ok(text)
}

fn read_tree(path: &Path) -> CliResult<HuffmanTree<char>> {
    let bytes = std::fs::read(path).map_err(|e| CliError::io(path, e))?;
    Ok(tree_codec::deserialize(&bytes)?)
}

fn write_file(path: &Path, bytes: &[u8]) -> CliResult<()> {
    std::fs::write(path, bytes).map_err(|e| CliError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tree_path() {
        assert_eq!(
            default_tree_path(Path::new("out/data.huff"), "tree"),
            PathBuf::from("out/data.huff.tree")
        );
        assert_eq!(
            default_tree_path(Path::new("payload"), "t"),
            PathBuf::from("payload.t")
        );
    }
}
