//! Text persistence: full ledger dumps and formatted period reports.

pub mod dump;
pub mod report;

use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{errors::LedgerError, ledger::Ledger, report::ReportEngine, time::Clock};

pub use dump::{read_full_dump, write_full_dump};
pub use report::write_report;

pub type Result<T> = std::result::Result<T, LedgerError>;

const TMP_SUFFIX: &str = "tmp";

/// Writes a full ledger dump to `path`, replacing any existing file only once the
/// whole document has been written.
pub fn save_full_dump(ledger: &Ledger, path: &Path) -> Result<()> {
    let mut buffer = Vec::new();
    write_full_dump(ledger, &mut buffer)?;
    persist(path, &buffer)?;
    tracing::info!(path = %path.display(), transactions = ledger.transactions().len(), "ledger dump saved");
    Ok(())
}

/// Writes a formatted report for `report_type` to `path`.
pub fn save_report(report_type: &str, engine: &ReportEngine<'_>, path: &Path) -> Result<()> {
    let mut buffer = Vec::new();
    write_report(report_type, engine, &mut buffer)?;
    persist(path, &buffer)?;
    tracing::info!(path = %path.display(), report_type, "report saved");
    Ok(())
}

/// Reads a ledger back from a dump produced by [`save_full_dump`].
pub fn load_full_dump(path: &Path, clock: Arc<dyn Clock>) -> Result<Ledger> {
    let file = File::open(path).map_err(|source| LedgerError::SinkUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let ledger = read_full_dump(io::BufReader::new(file), clock)?;
    tracing::info!(path = %path.display(), transactions = ledger.transactions().len(), "ledger dump loaded");
    Ok(ledger)
}

fn persist(path: &Path, data: &[u8]) -> Result<()> {
    let tmp = tmp_path(path);
    let result = write_atomic(&tmp, data).and_then(|()| fs::rename(&tmp, path));
    result.map_err(|source| {
        let _ = fs::remove_file(&tmp);
        tracing::error!(path = %path.display(), error = %source, "unable to write sink");
        LedgerError::SinkUnavailable {
            path: path.to_path_buf(),
            source,
        }
    })
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data)?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tmp_path_appends_suffix() {
        assert_eq!(
            tmp_path(Path::new("/data/wallet.txt")),
            PathBuf::from("/data/wallet.txt.tmp")
        );
        assert_eq!(
            tmp_path(Path::new("/data/wallet")),
            PathBuf::from("/data/wallet.tmp")
        );
    }
}
