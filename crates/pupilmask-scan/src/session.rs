//! One upload, from name check to reidentified reply.
//!
//! A [`Session`] owns the rows and, once anonymised, the only
//! [`PseudonymMap`] for them. Loading new data means building a new session;
//! the old map goes with the old session.

use std::collections::BTreeSet;

use jiff::Timestamp;
use tracing::{info, warn};
use uuid::Uuid;

use pupilmask_core::{NamingConfig, PseudonymMap, Record, SubstituteOptions, Value};

use crate::columns::{detect_name_column, headers_of};
use crate::error::ScanError;
use crate::leak::{FlaggedCell, scan};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    Uploaded,
    Scanned { flagged: usize },
    Anonymised,
    Reidentified,
}

#[derive(Debug)]
pub struct Session {
    id: Uuid,
    created_at: Timestamp,
    headers: Vec<String>,
    rows: Vec<Record>,
    name_column: String,
    stage: Stage,
    flagged: BTreeSet<FlaggedCell>,
    map: Option<PseudonymMap>,
}

impl Session {
    /// Start a session over `rows`. An empty `headers` list is filled from
    /// the rows themselves. Fails with [`ScanError::MissingNameColumn`] when
    /// no name column can be found.
    pub fn load(headers: Vec<String>, rows: Vec<Record>) -> Result<Self, ScanError> {
        let headers = if headers.is_empty() {
            headers_of(&rows)
        } else {
            headers
        };
        let name_column = detect_name_column(&headers, &rows)?;

        let session = Self {
            id: Uuid::new_v4(),
            created_at: Timestamp::now(),
            headers,
            rows,
            name_column,
            stage: Stage::Uploaded,
            flagged: BTreeSet::new(),
            map: None,
        };
        info!(
            session = %session.id,
            created_at = %session.created_at,
            rows = session.rows.len(),
            name_column = %session.name_column,
            "session loaded"
        );
        Ok(session)
    }

    /// Override the detected name column. Clears any earlier check.
    pub fn with_name_column(mut self, column: &str) -> Result<Self, ScanError> {
        if !self.headers.iter().any(|header| header == column) {
            return Err(ScanError::UnknownColumn(column.to_string()));
        }
        self.name_column = column.to_string();
        self.stage = Stage::Uploaded;
        self.flagged.clear();
        Ok(self)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn name_column(&self) -> &str {
        &self.name_column
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// The map built by [`Session::anonymise`], if it has run.
    pub fn map(&self) -> Option<&PseudonymMap> {
        self.map.as_ref()
    }

    /// Run the leak scan. Replaces the result of any earlier check.
    pub fn check_names(&mut self, common_names: &[&str]) -> Result<&BTreeSet<FlaggedCell>, ScanError> {
        self.flagged = scan(&self.rows, &self.name_column, common_names)?;
        self.stage = Stage::Scanned {
            flagged: self.flagged.len(),
        };
        if !self.flagged.is_empty() {
            warn!(session = %self.id, flagged = self.flagged.len(), "possible names outside the name column");
        }
        Ok(&self.flagged)
    }

    pub fn flagged(&self) -> &BTreeSet<FlaggedCell> {
        &self.flagged
    }

    pub fn is_clean(&self) -> bool {
        matches!(self.stage, Stage::Scanned { flagged: 0 })
            || matches!(self.stage, Stage::Anonymised | Stage::Reidentified)
    }

    /// Build the map from the name column and return anonymised copies of
    /// the rows: the name cell becomes its pseudonym and the listed `fields`
    /// have every mapped name replaced.
    ///
    /// Only a clean check permits this.
    pub fn anonymise(
        &mut self,
        config: &NamingConfig,
        fields: &[String],
    ) -> Result<Vec<Record>, ScanError> {
        match self.stage {
            Stage::Uploaded => return Err(ScanError::NotScanned),
            Stage::Scanned { flagged } if flagged > 0 => {
                return Err(ScanError::UnresolvedNameLeak { flagged });
            }
            _ => {}
        }

        let names = self
            .rows
            .iter()
            .filter_map(|row| row.get(&self.name_column))
            .filter_map(Value::as_text);
        let map = PseudonymMap::build(names, config);

        let options = SubstituteOptions::with_fields(
            fields
                .iter()
                .filter(|field| **field != self.name_column)
                .cloned(),
        );

        let mut anonymised = Vec::with_capacity(self.rows.len());
        for row in &self.rows {
            let mut out = match map.anonymise(&Value::Record(row.clone()), &options)? {
                Value::Record(record) => record,
                _ => row.clone(),
            };
            let pseudo = row
                .get(&self.name_column)
                .and_then(Value::as_text)
                .and_then(|name| map.pseudonym_for(name));
            if let Some(pseudo) = pseudo {
                out.insert(self.name_column.clone(), Value::Text(pseudo.to_string()));
            }
            anonymised.push(out);
        }

        info!(session = %self.id, pupils = map.len(), rows = anonymised.len(), "rows anonymised");
        self.map = Some(map);
        self.stage = Stage::Anonymised;
        Ok(anonymised)
    }

    fn map_or_err(&self) -> Result<&PseudonymMap, ScanError> {
        self.map.as_ref().ok_or(ScanError::NotAnonymised)
    }

    /// Put real names back into text returned by the completion service.
    /// Can be called any number of times once the rows are anonymised.
    pub fn reidentify_text(&mut self, text: &str) -> Result<String, ScanError> {
        let restored = self.map_or_err()?.reidentify_text(text)?;
        self.stage = Stage::Reidentified;
        Ok(restored)
    }

    pub fn reidentify(
        &mut self,
        input: &Value,
        options: &SubstituteOptions,
    ) -> Result<Value, ScanError> {
        let restored = self.map_or_err()?.reidentify(input, options)?;
        self.stage = Stage::Reidentified;
        Ok(restored)
    }
}
