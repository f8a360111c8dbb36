use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::consts::CSV_HEADER;
use crate::sensor::AccelReading;

/// Writer for the per-burst CSV artifact the offline processing stage
/// consumes: header row `x,y,z`, one row per sample, float fields
/// formatted exactly as on the wire.
pub struct BurstWriter {
    out: BufWriter<File>,
    rows: usize,
}

impl BurstWriter {
    pub fn create(path: &Path) -> std::io::Result<Self> {
        let mut out = BufWriter::new(File::create(path)?);
        writeln!(out, "{CSV_HEADER}")?;
        debug!("burst file opened: {}", path.display());
        Ok(Self { out, rows: 0 })
    }

    pub fn append(&mut self, reading: &AccelReading) -> std::io::Result<()> {
        writeln!(self.out, "{:?},{:?},{:?}", reading.x, reading.y, reading.z)?;
        self.rows += 1;
        Ok(())
    }

    pub fn finish(mut self) -> std::io::Result<usize> {
        self.out.flush()?;
        debug!("burst file closed after {} rows", self.rows);
        Ok(self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_is_byte_compatible_with_the_offline_stage() {
        let path = std::env::temp_dir().join(format!("burst_{}.csv", std::process::id()));
        let mut writer = BurstWriter::create(&path).unwrap();
        writer
            .append(&AccelReading::new(1.0, -2.5, 0.125))
            .unwrap();
        writer.append(&AccelReading::new(0.0, 0.0, -1.0)).unwrap();
        assert_eq!(writer.finish().unwrap(), 2);

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "x,y,z\n1.0,-2.5,0.125\n0.0,0.0,-1.0\n");
        std::fs::remove_file(&path).unwrap();
    }
}
