// src/io/fasta.rs
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Result, Write};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::graph::contig::Contig;

/// Sequence line width in written FASTA records
pub const LINE_WIDTH: usize = 80;

pub enum FastaWriter {
    Plain(BufWriter<File>),
    Compressed(BufWriter<GzEncoder<File>>),
}

/// Open a FASTA file for reading, handles gzipped files automatically
pub fn open_fasta<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Write `sequence` as lines of at most `width` characters
pub fn write_wrapped<W: Write + ?Sized>(writer: &mut W, sequence: &str, width: usize) -> Result<()> {
    for line in sequence.as_bytes().chunks(width.max(1)) {
        writer.write_all(line)?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

/// Write one contig record: `>contig_<n> len=<length>` followed by wrapped sequence
pub fn write_contig_record<W: Write + ?Sized>(writer: &mut W, contig: &Contig, number: usize) -> Result<()> {
    writeln!(writer, ">contig_{} len={}", number, contig.length)?;
    write_wrapped(writer, &contig.sequence, LINE_WIDTH)
}

impl FastaWriter {
    /// Create the output file; a `.gz` path is gzip-compressed
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)?;
        if path.extension().is_some_and(|ext| ext == "gz") {
            let encoder = GzEncoder::new(file, Compression::default());
            Ok(FastaWriter::Compressed(BufWriter::new(encoder)))
        } else {
            Ok(FastaWriter::Plain(BufWriter::new(file)))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            FastaWriter::Plain(writer) => writer,
            FastaWriter::Compressed(writer) => writer,
        }
    }

    pub fn write_contig(&mut self, contig: &Contig, number: usize) -> Result<()> {
        write_contig_record(self.writer(), contig, number)
    }

    /// Write contigs numbered from 1
    pub fn write_contigs(&mut self, contigs: &[Contig]) -> Result<()> {
        for (i, contig) in contigs.iter().enumerate() {
            self.write_contig(contig, i + 1)?;
        }
        Ok(())
    }

    /// Flush buffered output and finish the gzip stream if any
    pub fn finish(self) -> Result<()> {
        match self {
            FastaWriter::Plain(mut writer) => writer.flush(),
            FastaWriter::Compressed(writer) => {
                let encoder = writer.into_inner()?;
                encoder.finish()?;
                Ok(())
            }
        }
    }
}
