#![allow(dead_code)]

use std::path::Path;

/// Builds ECLIPSE unformatted files for tests.
#[derive(Default)]
pub struct EclFixture {
    bytes: Vec<u8>,
}

impl EclFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inte(self, name: &str, values: &[i32]) -> Self {
        let elems = values.iter().map(|v| v.to_be_bytes().to_vec()).collect();
        self.keyword(name, b"INTE", elems, 1000)
    }

    pub fn real(self, name: &str, values: &[f32]) -> Self {
        let elems = values.iter().map(|v| v.to_be_bytes().to_vec()).collect();
        self.keyword(name, b"REAL", elems, 1000)
    }

    pub fn doub(self, name: &str, values: &[f64]) -> Self {
        let elems = values.iter().map(|v| v.to_be_bytes().to_vec()).collect();
        self.keyword(name, b"DOUB", elems, 1000)
    }

    pub fn chars(self, name: &str, values: &[&str]) -> Self {
        let elems = values
            .iter()
            .map(|v| format!("{v:<8}").into_bytes()[..8].to_vec())
            .collect();
        self.keyword(name, b"CHAR", elems, 105)
    }

    pub fn mess(self, name: &str) -> Self {
        self.keyword(name, b"MESS", Vec::new(), 1000)
    }

    /// Report-step marker opening a unified-file block.
    pub fn seqnum(self, step: i32) -> Self {
        self.inte("SEQNUM", &[step])
    }

    /// A complete block with three cells and one well of two phases.
    pub fn state(self, pressure: [f32; 3]) -> Self {
        self.real("PRESSURE", &pressure)
            .real("TEMP", &[10.0, 20.0, 30.0])
            .real("SWAT", &[0.1, 0.2, 0.3])
            .real("SGAS", &[0.05, 0.1, 0.15])
            .doub("OPM_XWEL", &[250.0, 80.0, 1.5, 2.5, 240.0, 0.75])
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn write(&self, path: &Path) {
        std::fs::write(path, &self.bytes).expect("write fixture");
    }

    fn keyword(mut self, name: &str, ty: &[u8; 4], elems: Vec<Vec<u8>>, block: usize) -> Self {
        let mut header = Vec::with_capacity(16);
        header.extend_from_slice(format!("{name:<8}").as_bytes());
        header.extend_from_slice(&(elems.len() as i32).to_be_bytes());
        header.extend_from_slice(ty);
        self.record(&header);

        for chunk in elems.chunks(block) {
            let payload: Vec<u8> = chunk.concat();
            self.record(&payload);
        }
        self
    }

    fn record(&mut self, payload: &[u8]) {
        let n = payload.len() as u32;
        self.bytes.extend_from_slice(&n.to_be_bytes());
        self.bytes.extend_from_slice(payload);
        self.bytes.extend_from_slice(&n.to_be_bytes());
    }
}
