use crate::domain::model::StormIndexEntry;
use crate::utils::error::{Result, StormError};
use serde::Serialize;
use std::collections::HashMap;

const NAME: usize = 0;
const BASIN: usize = 1;
const CYCLONE_NUMBER: usize = 7;
const YEAR: usize = 8;
const STORM_TYPE: usize = 9;
const MIN_FIELDS: usize = STORM_TYPE + 1;

/// Normalized lookup key for a storm file name: surrounding whitespace
/// stripped, lowercased.
pub fn storm_key(filename: &str) -> String {
    filename.trim().to_lowercase()
}

/// The ATCF storm list, in source order, addressable by file name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StormIndex {
    entries: Vec<StormIndexEntry>,
    #[serde(skip)]
    by_filename: HashMap<String, usize>,
}

impl StormIndex {
    pub fn new(entries: Vec<StormIndexEntry>) -> Self {
        let mut by_filename = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            by_filename.entry(entry.filename.clone()).or_insert(i);
        }
        Self {
            entries,
            by_filename,
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        let entries = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| parse_index_line(line, i + 1))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(entries))
    }

    pub fn get(&self, filename: &str) -> Option<&StormIndexEntry> {
        self.by_filename
            .get(&storm_key(filename))
            .map(|&i| &self.entries[i])
    }

    pub fn by_year(&self, year: i32) -> Vec<&StormIndexEntry> {
        self.entries.iter().filter(|e| e.year == year).collect()
    }

    pub fn find_by_name(&self, name: &str) -> Vec<&StormIndexEntry> {
        let wanted = name.trim();
        self.entries
            .iter()
            .filter(|e| e.name.eq_ignore_ascii_case(wanted))
            .collect()
    }

    pub fn entries(&self) -> &[StormIndexEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StormIndexEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_index_line(line: &str, line_no: usize) -> Result<StormIndexEntry> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let context = || format!("storm index line {}", line_no);

    if fields.len() < MIN_FIELDS {
        return Err(StormError::parse(
            context(),
            format!("expected at least {} fields, found {}", MIN_FIELDS, fields.len()),
        ));
    }

    let cyclone_number = fields[CYCLONE_NUMBER].parse().map_err(|_| {
        StormError::parse(
            context(),
            format!("cyclone number '{}' is not an integer", fields[CYCLONE_NUMBER]),
        )
    })?;
    let year = fields[YEAR].parse().map_err(|_| {
        StormError::parse(context(), format!("year '{}' is not an integer", fields[YEAR]))
    })?;
    let filename = fields.last().map(|f| f.to_lowercase()).unwrap_or_default();

    Ok(StormIndexEntry {
        name: fields[NAME].to_string(),
        basin: fields[BASIN].to_string(),
        cyclone_number,
        year,
        storm_type: fields[STORM_TYPE].to_string(),
        filename,
    })
}
