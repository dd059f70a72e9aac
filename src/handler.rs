use std::collections::HashMap;

use axum::{extract::Query, http::Method, Extension, Json};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::discogs::{CollectionRelease, DiscogsClient};
use crate::error::Error;

pub const MAX_COUNT: usize = 100;

#[derive(Deserialize, Debug)]
pub struct RandomParams {
    pub count: Option<String>,
    pub format: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct RandomResponse {
    pub count: usize,
    pub releases: Vec<ReleaseSummary>,
}

#[derive(Serialize, Debug)]
pub struct ReleaseSummary {
    pub id: u64,
    pub title: String,
    pub year: i32,
    pub artists: Vec<String>,
    pub labels: Vec<String>,
    pub formats: Vec<FormatSummary>,
}

#[derive(Serialize, Debug)]
pub struct FormatSummary {
    pub name: String,
    pub descriptions: Vec<String>,
}

impl From<CollectionRelease> for ReleaseSummary {
    fn from(release: CollectionRelease) -> Self {
        let info = release.basic_information;
        Self {
            id: release.id,
            title: info.title,
            year: info.year,
            artists: info.artists.into_iter().map(|a| a.name).collect(),
            labels: info.labels.into_iter().map(|l| l.name).collect(),
            formats: info
                .formats
                .into_iter()
                .map(|f| FormatSummary {
                    name: f.name,
                    descriptions: f.descriptions,
                })
                .collect(),
        }
    }
}

pub async fn random_release(
    Extension(client): Extension<DiscogsClient>,
    Query(params): Query<RandomParams>,
) -> Result<Json<RandomResponse>, Error> {
    let count = parse_count(params.count.as_deref())?;
    let releases = client.fetch_collection(params.format.as_deref()).await?;
    let picked = sample(releases, count);

    Ok(Json(RandomResponse {
        count: picked.len(),
        releases: picked.into_iter().map(ReleaseSummary::from).collect(),
    }))
}

pub async fn hello(
    method: Method,
    Query(params): Query<HashMap<String, String>>,
) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Hello from the record shelf!",
        "httpMethod": method.as_str(),
        "queryParams": params,
    }))
}

fn parse_count(raw: Option<&str>) -> Result<usize, Error> {
    let Some(raw) = raw else {
        return Ok(1);
    };
    match raw.parse::<usize>() {
        Ok(count) if count > 0 => Ok(count.min(MAX_COUNT)),
        _ => Err(Error::InvalidCount),
    }
}

/// Uniform sample without replacement by rejection: draw a random index,
/// skip slots already taken, stop once the quota is met or every slot is
/// used. Output order is the order in which draws succeeded.
fn sample(releases: Vec<CollectionRelease>, count: usize) -> Vec<CollectionRelease> {
    let total = releases.len();
    let mut slots: Vec<Option<CollectionRelease>> = releases.into_iter().map(Some).collect();
    let mut picked = Vec::with_capacity(count.min(total));
    let mut rng = rand::rng();

    while picked.len() < count && picked.len() < total {
        let index = rng.random_range(0..total);
        if let Some(release) = slots[index].take() {
            picked.push(release);
        }
    }

    picked
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn release(id: u64) -> CollectionRelease {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "basic_information": {
                "title": format!("Release {id}"),
                "year": 2024,
                "artists": [{ "name": "Artist" }],
                "labels": [{ "name": "Label" }],
                "formats": [{ "name": "Vinyl", "descriptions": ["LP"] }]
            }
        }))
        .unwrap()
    }

    #[test]
    fn parse_count_defaults_to_one() {
        assert_eq!(parse_count(None).unwrap(), 1);
    }

    #[test]
    fn parse_count_accepts_and_clamps() {
        assert_eq!(parse_count(Some("5")).unwrap(), 5);
        assert_eq!(parse_count(Some("100")).unwrap(), 100);
        assert_eq!(parse_count(Some("500")).unwrap(), 100);
    }

    #[test]
    fn parse_count_rejects_garbage() {
        assert!(matches!(parse_count(Some("abc")), Err(Error::InvalidCount)));
        assert!(matches!(parse_count(Some("0")), Err(Error::InvalidCount)));
        assert!(matches!(parse_count(Some("-3")), Err(Error::InvalidCount)));
        assert!(matches!(parse_count(Some("1.5")), Err(Error::InvalidCount)));
    }

    #[test]
    fn sample_draws_distinct_releases() {
        let releases: Vec<_> = (0..50).map(release).collect();
        let picked = sample(releases, 10);

        assert_eq!(picked.len(), 10);
        let ids: HashSet<_> = picked.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn sample_returns_everything_when_count_exceeds_len() {
        let releases: Vec<_> = (0..3).map(release).collect();
        let picked = sample(releases, 10);

        assert_eq!(picked.len(), 3);
        let ids: HashSet<_> = picked.iter().map(|r| r.id).collect();
        assert_eq!(ids, HashSet::from([0, 1, 2]));
    }

    #[test]
    fn sample_of_empty_collection_is_empty() {
        assert!(sample(Vec::new(), 5).is_empty());
    }

    #[test]
    fn summary_flattens_names_and_formats() {
        let summary = ReleaseSummary::from(release(7));

        assert_eq!(summary.id, 7);
        assert_eq!(summary.title, "Release 7");
        assert_eq!(summary.artists, vec!["Artist"]);
        assert_eq!(summary.labels, vec!["Label"]);
        assert_eq!(summary.formats[0].name, "Vinyl");
        assert_eq!(summary.formats[0].descriptions, vec!["LP"]);
    }
}
