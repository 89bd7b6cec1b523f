//! Gzip + JSON encoding for persisted pages

use crate::types::{Page, StatusRecord};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{self, Read, Write};

/// Serialize a page to JSON and gzip it
pub fn encode(page: &[StatusRecord]) -> io::Result<Vec<u8>> {
    let json = serde_json::to_vec(page)?;
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&json)?;
    encoder.finish()
}

/// Gunzip and parse a page
pub fn decode(bytes: &[u8]) -> io::Result<Page> {
    let mut decoder = GzDecoder::new(bytes);
    let mut json = Vec::new();
    decoder.read_to_end(&mut json)?;
    let page = serde_json::from_slice(&json)?;
    Ok(page)
}
