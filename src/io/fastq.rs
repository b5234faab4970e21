// src/io/fastq.rs
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::error::{AssemblyError, Result};

#[derive(Debug, Clone)]
pub struct FastqRecord {
    pub header: String,
    pub sequence: String,
    pub plus: String,
    pub quality: String,
}

/// Open a FASTQ file for reading, handles gzipped files automatically
pub fn open_fastq<P: AsRef<Path>>(path: P) -> io::Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Stream validated FASTQ records.
///
/// Records are parsed lazily, four lines at a time. A record with the wrong
/// shape or a base outside ACGT ends the stream with an error; lower-case bases
/// are upper-cased first.
pub fn stream_fastq_records<R: BufRead>(reader: R) -> FastqStreamParser<io::Lines<R>> {
    FastqStreamParser {
        lines: reader.lines(),
        line_no: 0,
        failed: false,
    }
}

/// Read every sequence of a FASTQ file
pub fn read_sequences<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let reader = open_fastq(path)?;
    stream_fastq_records(reader)
        .map(|record| record.map(|r| r.sequence))
        .collect()
}

/// Iterator adaptor to handle streaming FASTQ parsing
pub struct FastqStreamParser<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    lines: I,
    line_no: usize,
    failed: bool,
}

impl<I> FastqStreamParser<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    fn next_line(&mut self) -> Result<Option<String>> {
        match self.lines.next() {
            Some(line) => {
                self.line_no += 1;
                Ok(Some(line?))
            }
            None => Ok(None),
        }
    }

    fn required_line(&mut self, what: &str) -> Result<String> {
        self.next_line()?.ok_or_else(|| AssemblyError::MalformedRecord {
            line: self.line_no + 1,
            reason: format!("truncated record, missing {}", what),
        })
    }

    fn parse_record(&mut self) -> Result<Option<FastqRecord>> {
        let header = loop {
            match self.next_line()? {
                None => return Ok(None),
                Some(line) if line.trim().is_empty() => continue,
                Some(line) => break line,
            }
        };
        let header_line = self.line_no;
        if !header.starts_with('@') {
            return Err(AssemblyError::MalformedRecord {
                line: header_line,
                reason: "header does not start with '@'".to_string(),
            });
        }

        let mut sequence = self.required_line("sequence")?.trim_end().to_string();
        let sequence_line = self.line_no;
        sequence.make_ascii_uppercase();
        if let Some(base) = sequence.chars().find(|c| !matches!(c, 'A' | 'C' | 'G' | 'T')) {
            return Err(AssemblyError::InvalidBase {
                line: sequence_line,
                base,
            });
        }

        let plus = self.required_line("separator")?;
        if !plus.starts_with('+') {
            return Err(AssemblyError::MalformedRecord {
                line: self.line_no,
                reason: "separator does not start with '+'".to_string(),
            });
        }

        let quality = self.required_line("quality")?.trim_end().to_string();
        if quality.len() != sequence.len() {
            return Err(AssemblyError::MalformedRecord {
                line: self.line_no,
                reason: format!(
                    "quality length {} does not match sequence length {}",
                    quality.len(),
                    sequence.len()
                ),
            });
        }

        Ok(Some(FastqRecord {
            header,
            sequence,
            plus,
            quality,
        }))
    }
}

impl<I> Iterator for FastqStreamParser<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    type Item = Result<FastqRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.parse_record() {
            Ok(record) => record.map(Ok),
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}
