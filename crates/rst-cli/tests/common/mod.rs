#![allow(dead_code)]

use std::path::Path;

/// Writes ECLIPSE unformatted restart fixtures for the CLI tests.
///
/// Only numeric keywords are needed here, so every payload goes out in
/// records of at most 1000 elements.
#[derive(Default)]
pub struct RestartFixture {
    bytes: Vec<u8>,
}

impl RestartFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seqnum(self, step: i32) -> Self {
        self.keyword("SEQNUM", b"INTE", &[step.to_be_bytes()])
    }

    pub fn real(self, name: &str, values: &[f32]) -> Self {
        let elems: Vec<[u8; 4]> = values.iter().map(|v| v.to_be_bytes()).collect();
        self.keyword(name, b"REAL", &elems)
    }

    pub fn doub(self, name: &str, values: &[f64]) -> Self {
        let elems: Vec<[u8; 8]> = values.iter().map(|v| v.to_be_bytes()).collect();
        self.keyword(name, b"DOUB", &elems)
    }

    /// Three cells and one two-phase well with a single perforation.
    pub fn state(self, pressure: [f32; 3]) -> Self {
        self.real("PRESSURE", &pressure)
            .real("TEMP", &[10.0, 20.0, 30.0])
            .real("SWAT", &[0.1, 0.2, 0.3])
            .real("SGAS", &[0.05, 0.1, 0.15])
            .doub("OPM_XWEL", &[250.0, 80.0, 1.5, 2.5, 240.0, 0.75])
    }

    pub fn write(&self, path: &Path) {
        std::fs::write(path, &self.bytes).expect("write restart fixture");
    }

    fn keyword<const W: usize>(mut self, name: &str, ty: &[u8; 4], elems: &[[u8; W]]) -> Self {
        let mut header = format!("{name:<8}").into_bytes();
        header.extend_from_slice(&(elems.len() as i32).to_be_bytes());
        header.extend_from_slice(ty);
        self.record(&header);
        for chunk in elems.chunks(1000) {
            self.record(&chunk.concat());
        }
        self
    }

    fn record(&mut self, payload: &[u8]) {
        let len = (payload.len() as u32).to_be_bytes();
        self.bytes.extend_from_slice(&len);
        self.bytes.extend_from_slice(payload);
        self.bytes.extend_from_slice(&len);
    }
}
