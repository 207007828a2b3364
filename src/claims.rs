use std::fmt;

use tracing::{debug, warn};
use url::Url;

use crate::domain::ClaimsError;

// A struct with different types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimStatus {
    OPEN,
    PENDING,
    COMPLETED,
}

impl ClaimStatus {
    /// Every status a claim can be in, in selector order.
    pub const ALL: [ClaimStatus; 3] =
        [ClaimStatus::OPEN, ClaimStatus::PENDING, ClaimStatus::COMPLETED];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::OPEN => "open",
            ClaimStatus::PENDING => "pending",
            ClaimStatus::COMPLETED => "completed",
        }
    }

    /// Parse one of the three wire names. Anything else is rejected so no
    /// unknown status can enter the working set.
    pub fn parse(s: &str) -> Result<Self, ClaimsError> {
        match s {
            "open" => Ok(ClaimStatus::OPEN),
            "pending" => Ok(ClaimStatus::PENDING),
            "completed" => Ok(ClaimStatus::COMPLETED),
            other => Err(ClaimsError::UnknownStatus(other.to_string())),
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    ASCENDING,
    DESCENDING,
}

impl SortDirection {
    pub fn flipped(&self) -> Self {
        match self {
            SortDirection::ASCENDING => SortDirection::DESCENDING,
            SortDirection::DESCENDING => SortDirection::ASCENDING,
        }
    }

    pub fn indicator(&self) -> &'static str {
        match self {
            SortDirection::ASCENDING => "▲",
            SortDirection::DESCENDING => "▼",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    ClaimNumber,
    Owner,
    Vehicle,
    Vin,
    Status,
}

/// Column order as rendered in the table.
pub const COLUMNS: [SortKey; 5] = [
    SortKey::ClaimNumber,
    SortKey::Owner,
    SortKey::Vehicle,
    SortKey::Vin,
    SortKey::Status,
];

impl SortKey {
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::ClaimNumber => "Claim #",
            SortKey::Owner => "Owner",
            SortKey::Vehicle => "Vehicle",
            SortKey::Vin => "VIN",
            SortKey::Status => "Status",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Claim {
    pub claim_number: String,
    pub owner: String,
    pub vehicle: String,
    pub vin: String,
    pub status: ClaimStatus,
}

impl Claim {
    pub fn field(&self, key: SortKey) -> &str {
        match key {
            SortKey::ClaimNumber => &self.claim_number,
            SortKey::Owner => &self.owner,
            SortKey::Vehicle => &self.vehicle,
            SortKey::Vin => &self.vin,
            SortKey::Status => self.status.as_str(),
        }
    }

    // needle has to be lowercased already
    fn matches(&self, needle: &str) -> bool {
        COLUMNS
            .iter()
            .any(|&key| self.field(key).to_lowercase().contains(needle))
    }
}

fn claim(number: &str, owner: &str, vehicle: &str, vin: &str, status: ClaimStatus) -> Claim {
    Claim {
        claim_number: number.to_string(),
        owner: owner.to_string(),
        vehicle: vehicle.to_string(),
        vin: vin.to_string(),
        status,
    }
}

/// The sample working set the dashboard is seeded with on startup.
pub fn sample_claims() -> Vec<Claim> {
    vec![
        claim(
            "CL-2024-0000004-LONGER-EXAMPLE",
            "Caroline Bowman",
            "2021 Tesla Model 3",
            "5YJ3E1EA7MF123456",
            ClaimStatus::OPEN,
        ),
        claim(
            "CL-2024-001",
            "John Smith",
            "2020 Toyota Camry",
            "1HGBH41JXMN109186",
            ClaimStatus::COMPLETED,
        ),
        claim(
            "CL-2024-002",
            "Jane Doe",
            "2019 Honda Accord",
            "5FNRL6H70MB123456",
            ClaimStatus::PENDING,
        ),
        claim(
            "CL-2024-003",
            "Larry Fairley",
            "2018 Ford F-150",
            "1FTFW1E50JKD12345",
            ClaimStatus::PENDING,
        ),
    ]
}

/// The claim working set. Claim numbers are unique within the set, enforced
/// at ingestion, so lookups by claim number hit at most one record.
pub struct ClaimSet {
    claims: Vec<Claim>,
}

impl ClaimSet {
    pub fn ingest(claims: Vec<Claim>) -> Result<Self, ClaimsError> {
        let mut seen = std::collections::HashSet::new();
        for c in claims.iter() {
            if !seen.insert(c.claim_number.as_str()) {
                return Err(ClaimsError::DuplicateClaim(c.claim_number.clone()));
            }
        }
        debug!("Ingested {} claims", claims.len());
        Ok(ClaimSet { claims })
    }

    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn get(&self, idx: usize) -> Option<&Claim> {
        self.claims.get(idx)
    }

    /// Replace the status of the claim with the given claim number. All other
    /// records are untouched. An unknown claim number is a no-op; callers that
    /// care get `false` back.
    pub fn update_status(&mut self, claim_number: &str, status: ClaimStatus) -> bool {
        match self
            .claims
            .iter_mut()
            .find(|c| c.claim_number == claim_number)
        {
            Some(c) => {
                debug!("Claim {}: {} -> {}", claim_number, c.status, status);
                c.status = status;
                true
            }
            None => {
                warn!("Status update for unknown claim {claim_number} ignored");
                false
            }
        }
    }

    /// Recompute the filtered and sorted row mapping from scratch. Returned
    /// indices point into `claims()`. The sort is stable, ties keep the order
    /// records have in the working set.
    pub fn derive_view(
        &self,
        query: &str,
        key: SortKey,
        direction: SortDirection,
    ) -> Vec<usize> {
        let needle = query.trim().to_lowercase();

        let mut rows: Vec<usize> = self
            .claims
            .iter()
            .enumerate()
            .filter(|(_, c)| needle.is_empty() || c.matches(&needle))
            .map(|(idx, _)| idx)
            .collect();

        rows.sort_by(|&a, &b| {
            let av = self.claims[a].field(key).to_lowercase();
            let bv = self.claims[b].field(key).to_lowercase();
            match direction {
                SortDirection::ASCENDING => av.cmp(&bv),
                SortDirection::DESCENDING => bv.cmp(&av),
            }
        });
        rows
    }
}

/// Build the detail link for a claim by pushing the claim number as one path
/// segment onto the base, which percent-encodes it.
pub fn detail_url(base: &Url, claim_number: &str) -> Result<String, ClaimsError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ClaimsError::InvalidDetailBase(base.to_string()))?
        .push(claim_number);
    Ok(url.to_string())
}
