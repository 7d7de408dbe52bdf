use serde::Deserialize;

/// Client for the geocoding API. One attempt per lookup, no retries;
/// callers treat every failure as "no coordinates".
pub struct Geocoder {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Deserialize)]
struct Geometry {
    location: Coordinates,
}

impl Geocoder {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build reqwest client"),
            base_url,
            api_key,
        }
    }

    /// Resolve an address to coordinates. `Ok(None)` covers both a
    /// non-success response and an empty result set.
    pub async fn lookup(&self, address: &str) -> Result<Option<Coordinates>, reqwest::Error> {
        let resp = self
            .client
            .get(&self.base_url)
            .query(&[("address", address), ("key", self.api_key.as_str())])
            .send()
            .await?;

        if !resp.status().is_success() {
            tracing::warn!(status = %resp.status(), "Geocoding returned non-success status");
            return Ok(None);
        }

        let data: GeocodeResponse = resp.json().await?;
        Ok(data.results.into_iter().next().map(|r| r.geometry.location))
    }
}

/// Join the address parts the way the upstream API expects:
/// comma-separated, skipping anything absent or blank.
pub fn assemble_address(
    address: &str,
    city: Option<&str>,
    state: Option<&str>,
    zip_code: Option<&str>,
) -> String {
    let mut parts = vec![address];
    for part in [city, state, zip_code].into_iter().flatten() {
        if !part.trim().is_empty() {
            parts.push(part);
        }
    }
    parts.join(", ")
}
