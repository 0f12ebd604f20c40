//! Reader for ECLIPSE unformatted (big-endian, Fortran record) files.
//!
//! Layout of one keyword:
//! - header record: `[16][name: 8 bytes][count: i32][type: 4 bytes][16]`
//! - `ceil(count / block_len)` data records: `[n*size][payload][n*size]`
//!
//! Opening scans the headers only; payloads are read on demand.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::ops::Range;
use std::path::{Path, PathBuf};

use rst_contracts::KW_SEQNUM;

use crate::error::RestartError;
use crate::source::{KeywordData, KeywordSource};

const HEADER_LEN: u32 = 16;
const NUMERIC_BLOCK: usize = 1000;
const CHAR_BLOCK: usize = 105;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EclType {
    Inte,
    Real,
    Doub,
    Logi,
    Char,
    Mess,
    /// Fixed-width string of the given length.
    C0nn(u8),
}

impl EclType {
    pub fn parse(raw: &[u8]) -> Option<Self> {
        match raw {
            b"INTE" => Some(EclType::Inte),
            b"REAL" => Some(EclType::Real),
            b"DOUB" => Some(EclType::Doub),
            b"LOGI" => Some(EclType::Logi),
            b"CHAR" => Some(EclType::Char),
            b"MESS" => Some(EclType::Mess),
            [b'C', b'0', d1, d2] if d1.is_ascii_digit() && d2.is_ascii_digit() => {
                let n = (d1 - b'0') * 10 + (d2 - b'0');
                (n > 0).then_some(EclType::C0nn(n))
            }
            _ => None,
        }
    }

    pub fn element_size(self) -> usize {
        match self {
            EclType::Inte | EclType::Real | EclType::Logi => 4,
            EclType::Doub | EclType::Char => 8,
            EclType::Mess => 0,
            EclType::C0nn(n) => n as usize,
        }
    }

    pub fn block_len(self) -> usize {
        match self {
            EclType::Char | EclType::C0nn(_) => CHAR_BLOCK,
            _ => NUMERIC_BLOCK,
        }
    }

    /// Bytes occupied by `count` elements including record markers.
    fn payload_bytes(self, count: usize) -> u64 {
        let size = self.element_size();
        if count == 0 || size == 0 {
            return 0;
        }
        let blocks = count.div_ceil(self.block_len());
        (count * size + blocks * 8) as u64
    }
}

impl fmt::Display for EclType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EclType::Inte => f.write_str("INTE"),
            EclType::Real => f.write_str("REAL"),
            EclType::Doub => f.write_str("DOUB"),
            EclType::Logi => f.write_str("LOGI"),
            EclType::Char => f.write_str("CHAR"),
            EclType::Mess => f.write_str("MESS"),
            EclType::C0nn(n) => write!(f, "C0{n:02}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordHeader {
    pub name: String,
    pub count: usize,
    pub ty: EclType,
    data_offset: u64,
}

/// An open restart file. Dropping it closes the underlying file.
#[derive(Debug)]
pub struct EclFile {
    path: PathBuf,
    reader: BufReader<File>,
    headers: Vec<KeywordHeader>,
    block: Range<usize>,
}

impl EclFile {
    pub fn open(path: &Path) -> Result<Self, RestartError> {
        let not_found = || RestartError::FileNotFound {
            path: path.to_path_buf(),
        };
        let file = File::open(path).map_err(|_| not_found())?;
        let meta = file.metadata().map_err(|_| not_found())?;
        if !meta.is_file() {
            return Err(not_found());
        }
        let len = meta.len();
        let mut reader = BufReader::new(file);
        let headers = scan_headers(&mut reader, len).map_err(|detail| {
            RestartError::MalformedContainer {
                path: path.to_path_buf(),
                detail,
            }
        })?;
        let block = 0..headers.len();
        Ok(Self {
            path: path.to_path_buf(),
            reader,
            headers,
            block,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Headers of the active block.
    pub fn headers(&self) -> &[KeywordHeader] {
        &self.headers[self.block.clone()]
    }

    /// Report steps of every `SEQNUM` block, in file order.
    pub fn report_steps(&mut self) -> Result<Vec<u32>, RestartError> {
        let mut steps = Vec::new();
        for idx in self.seqnum_positions() {
            steps.push(self.read_seqnum(idx)?);
        }
        Ok(steps)
    }

    /// Restricts lookups to the block of `step`. Returns false, leaving the
    /// selection unchanged, when no block carries that step.
    pub fn select_report_step(&mut self, step: u32) -> Result<bool, RestartError> {
        let seqnums = self.seqnum_positions();
        for (i, &idx) in seqnums.iter().enumerate() {
            if self.read_seqnum(idx)? != step {
                continue;
            }
            let end = seqnums.get(i + 1).copied().unwrap_or(self.headers.len());
            self.block = idx..end;
            return Ok(true);
        }
        Ok(false)
    }

    fn seqnum_positions(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .filter(|(_, h)| h.name == KW_SEQNUM)
            .map(|(idx, _)| idx)
            .collect()
    }

    fn read_seqnum(&mut self, idx: usize) -> Result<u32, RestartError> {
        match self.read_at(idx)? {
            KeywordData::Inte(v) if !v.is_empty() && v[0] >= 0 => Ok(v[0] as u32),
            other => Err(self.malformed(format!(
                "{KW_SEQNUM} must hold a non-negative INTE, found {} x{}",
                other.ecl_type(),
                other.len()
            ))),
        }
    }

    fn read_at(&mut self, idx: usize) -> Result<KeywordData, RestartError> {
        let header = self.headers[idx].clone();
        self.reader
            .seek(SeekFrom::Start(header.data_offset))
            .map_err(|err| self.malformed(format!("seek to {}: {err}", header.name)))?;
        read_payload(&mut self.reader, &header)
            .map_err(|detail| self.malformed(format!("keyword {}: {detail}", header.name)))
    }

    fn malformed(&self, detail: String) -> RestartError {
        RestartError::MalformedContainer {
            path: self.path.clone(),
            detail,
        }
    }
}

impl KeywordSource for EclFile {
    fn contains(&self, name: &str) -> bool {
        self.headers().iter().any(|h| h.name == name)
    }

    fn first(&mut self, name: &str) -> Result<Option<KeywordData>, RestartError> {
        let Some(idx) = self.block.clone().find(|&i| self.headers[i].name == name) else {
            return Ok(None);
        };
        self.read_at(idx).map(Some)
    }
}

fn read_u32<R: Read>(r: &mut R) -> std::io::Result<u32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_be_bytes(buf))
}

fn scan_headers<R: Read + Seek>(r: &mut R, len: u64) -> Result<Vec<KeywordHeader>, String> {
    let mut headers = Vec::new();
    let mut pos = 0u64;
    while pos < len {
        let lead = read_u32(r).map_err(|err| format!("header at offset {pos}: {err}"))?;
        if lead != HEADER_LEN {
            return Err(format!(
                "header at offset {pos}: record length {lead}, expected {HEADER_LEN}"
            ));
        }
        let mut raw = [0u8; 16];
        r.read_exact(&mut raw)
            .map_err(|err| format!("header at offset {pos}: {err}"))?;
        let trail = read_u32(r).map_err(|err| format!("header at offset {pos}: {err}"))?;
        if trail != HEADER_LEN {
            return Err(format!(
                "header at offset {pos}: trailing record length {trail}, expected {HEADER_LEN}"
            ));
        }

        let name = std::str::from_utf8(&raw[0..8])
            .map_err(|_| format!("header at offset {pos}: keyword name is not ASCII"))?
            .trim_end()
            .to_string();
        let count = i32::from_be_bytes([raw[8], raw[9], raw[10], raw[11]]);
        let count = usize::try_from(count)
            .map_err(|_| format!("keyword {name}: negative element count {count}"))?;
        let ty = EclType::parse(&raw[12..16]).ok_or_else(|| {
            format!(
                "keyword {name}: unknown type {:?}",
                String::from_utf8_lossy(&raw[12..16])
            )
        })?;

        let data_offset = pos + u64::from(HEADER_LEN) + 8;
        let next = data_offset + ty.payload_bytes(count);
        if next > len {
            return Err(format!(
                "keyword {name}: {count} x {ty} runs past end of file ({next} > {len})"
            ));
        }
        r.seek(SeekFrom::Start(next))
            .map_err(|err| format!("keyword {name}: {err}"))?;

        headers.push(KeywordHeader {
            name,
            count,
            ty,
            data_offset,
        });
        pos = next;
    }
    Ok(headers)
}

fn read_payload<R: Read>(r: &mut R, header: &KeywordHeader) -> Result<KeywordData, String> {
    let ty = header.ty;
    let size = ty.element_size();
    if ty == EclType::Mess {
        return Ok(KeywordData::Mess);
    }

    let mut bytes = Vec::with_capacity(header.count * size);
    let mut remaining = header.count;
    while remaining > 0 {
        let n = remaining.min(ty.block_len());
        let want = (n * size) as u32;
        let lead = read_u32(r).map_err(|err| err.to_string())?;
        if lead != want {
            return Err(format!("data record length {lead}, expected {want}"));
        }
        let start = bytes.len();
        bytes.resize(start + n * size, 0);
        r.read_exact(&mut bytes[start..])
            .map_err(|err| err.to_string())?;
        let trail = read_u32(r).map_err(|err| err.to_string())?;
        if trail != want {
            return Err(format!("trailing data record length {trail}, expected {want}"));
        }
        remaining -= n;
    }

    let data = match ty {
        EclType::Inte => KeywordData::Inte(
            bytes
                .chunks_exact(4)
                .map(|c| i32::from_be_bytes([c[0], c[1], c[2], c[3]]))
                .collect(),
        ),
        EclType::Real => KeywordData::Real(
            bytes
                .chunks_exact(4)
                .map(|c| f32::from_be_bytes([c[0], c[1], c[2], c[3]]))
                .collect(),
        ),
        EclType::Doub => KeywordData::Doub(
            bytes
                .chunks_exact(8)
                .map(|c| f64::from_be_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]))
                .collect(),
        ),
        EclType::Logi => KeywordData::Logi(
            bytes
                .chunks_exact(4)
                .map(|c| i32::from_be_bytes([c[0], c[1], c[2], c[3]]) != 0)
                .collect(),
        ),
        EclType::Char | EclType::C0nn(_) => KeywordData::Char {
            width: size as u8,
            values: bytes
                .chunks_exact(size)
                .map(|c| String::from_utf8_lossy(c).trim_end().to_string())
                .collect(),
        },
        EclType::Mess => KeywordData::Mess,
    };
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_types() {
        assert_eq!(EclType::parse(b"REAL"), Some(EclType::Real));
        assert_eq!(EclType::parse(b"C012"), Some(EclType::C0nn(12)));
        assert_eq!(EclType::parse(b"C000"), None);
        assert_eq!(EclType::parse(b"real"), None);
        assert_eq!(EclType::C0nn(8).to_string(), "C008");
    }

    #[test]
    fn payload_bytes_counts_block_markers() {
        assert_eq!(EclType::Real.payload_bytes(0), 0);
        assert_eq!(EclType::Real.payload_bytes(3), 12 + 8);
        assert_eq!(EclType::Real.payload_bytes(1000), 4000 + 8);
        assert_eq!(EclType::Real.payload_bytes(1001), 4004 + 16);
        assert_eq!(EclType::Char.payload_bytes(106), 848 + 16);
        assert_eq!(EclType::Mess.payload_bytes(5), 0);
    }

    #[test]
    fn truncated_header_is_reported() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&16u32.to_be_bytes());
        bytes.extend_from_slice(b"PRESSURE");
        let mut cur = std::io::Cursor::new(bytes.clone());
        let err = scan_headers(&mut cur, bytes.len() as u64).unwrap_err();
        assert!(err.contains("offset 0"), "{err}");
    }

    #[test]
    fn payload_split_across_blocks() {
        let header = KeywordHeader {
            name: "X".to_string(),
            count: 1001,
            ty: EclType::Inte,
            data_offset: 0,
        };
        let mut bytes = Vec::new();
        for chunk in [0..1000i32, 1000..1001] {
            let n = (chunk.len() * 4) as u32;
            bytes.extend_from_slice(&n.to_be_bytes());
            for v in chunk {
                bytes.extend_from_slice(&v.to_be_bytes());
            }
            bytes.extend_from_slice(&n.to_be_bytes());
        }
        let data = read_payload(&mut std::io::Cursor::new(bytes), &header).unwrap();
        let KeywordData::Inte(v) = data else {
            panic!("expected INTE");
        };
        assert_eq!(v.len(), 1001);
        assert_eq!(v[1000], 1000);
    }
}
