use crate::geocoding::{GeocodingError, GeocodingResult, ReverseGeocoder};
use async_trait::async_trait;
use bon::bon;
use common_types::{Coordinates, GeocodedLocation, GeocodedPlace};
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;
use url::Url;

pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_USER_AGENT: &str = "Pinspot-Travel-Map";
/// City level detail.
pub const DEFAULT_ZOOM: u8 = 10;
const SEARCH_LIMIT: u8 = 10;

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct NominatimAddress {
    pub country: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub county: Option<String>,
    pub postcode: Option<String>,
}

impl NominatimAddress {
    /// The most specific settlement name available.
    #[must_use]
    pub fn settlement(&self) -> Option<&str> {
        self.city
            .as_deref()
            .or(self.town.as_deref())
            .or(self.village.as_deref())
            .or(self.county.as_deref())
    }
}

/// Body of a successful `/reverse` call.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NominatimReverse {
    pub lat: String,
    pub lon: String,
    pub display_name: String,
    #[serde(default)]
    pub address: NominatimAddress,
}

/// Nominatim answers a reverse lookup without result with a 200 and an error object.
#[derive(Deserialize)]
#[serde(untagged)]
enum ReverseResponse {
    Found(NominatimReverse),
    NotFound { error: String },
}

/// A `/search` hit.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NominatimPlace {
    pub place_id: u64,
    #[serde(default)]
    pub name: Option<String>,
    pub display_name: String,
    pub lat: String,
    pub lon: String,
    #[serde(rename = "type", default)]
    pub place_type: Option<String>,
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub importance: Option<f64>,
    #[serde(default)]
    pub address: Option<HashMap<String, String>>,
}

/// Builds the short display name for a reverse lookup: `City, Country`, `City, State, Country`
/// when the state adds information, or Nominatim's full display name otherwise.
#[must_use]
pub fn place_from_reverse(result: &NominatimReverse) -> GeocodedPlace {
    let address = &result.address;
    let city = address.settlement().map(str::to_string);
    let country = address.country.clone();
    let state = address.state.clone();

    let display_name = match (&city, &country) {
        (Some(city), Some(country)) => match &state {
            Some(state) if state != city && state != country => {
                format!("{city}, {state}, {country}")
            }
            _ => format!("{city}, {country}"),
        },
        _ => result.display_name.clone(),
    };

    GeocodedPlace {
        display_name,
        country,
        city,
        state,
    }
}

fn parse_coordinate(value: &str, field: &str) -> GeocodingResult<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| GeocodingError::InvalidResponse(format!("{field} is not a number: '{value}'")))
}

/// Formats a search hit for display. Places without a name use the first part of their address.
pub fn format_place(place: &NominatimPlace) -> GeocodingResult<GeocodedLocation> {
    let name = place
        .name
        .as_deref()
        .filter(|name| !name.is_empty())
        .or_else(|| place.display_name.split(',').next())
        .unwrap_or_default()
        .trim()
        .to_string();

    Ok(GeocodedLocation {
        name,
        address: place.display_name.clone(),
        latitude: parse_coordinate(&place.lat, "lat")?,
        longitude: parse_coordinate(&place.lon, "lon")?,
        place_id: place.place_id,
    })
}

/// Client for an OpenStreetMap Nominatim server.
#[derive(Clone, Debug)]
pub struct NominatimClient {
    http: reqwest::Client,
    base_url: Url,
    zoom: u8,
}

#[bon]
impl NominatimClient {
    #[builder(start_fn = with_base_url)]
    pub fn new(
        #[builder(start_fn)] base_url: &str,
        user_agent: Option<&str>,
        zoom: Option<u8>,
        timeout: Option<Duration>,
    ) -> GeocodingResult<Self> {
        let mut http = reqwest::Client::builder().user_agent(user_agent.unwrap_or(DEFAULT_USER_AGENT));
        if let Some(timeout) = timeout {
            http = http.timeout(timeout);
        }

        Ok(Self {
            http: http.build()?,
            base_url: Url::parse(base_url)?,
            zoom: zoom.unwrap_or(DEFAULT_ZOOM),
        })
    }
}

impl NominatimClient {
    fn endpoint(&self, name: &str) -> Url {
        let mut url = self.base_url.clone();
        let path = format!("{}/{name}", url.path().trim_end_matches('/'));
        url.set_path(&path);
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> GeocodingResult<T> {
        debug!("Nominatim request: {url}");
        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GeocodingError::Api {
                status: response.status(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        Ok(response.json().await?)
    }

    /// Raw reverse lookup.
    pub async fn reverse(&self, latitude: f64, longitude: f64) -> GeocodingResult<NominatimReverse> {
        let mut url = self.endpoint("reverse");
        url.query_pairs_mut()
            .append_pair("lat", &latitude.to_string())
            .append_pair("lon", &longitude.to_string())
            .append_pair("format", "json")
            .append_pair("zoom", &self.zoom.to_string())
            .append_pair("addressdetails", "1");

        match self.get_json::<ReverseResponse>(url).await? {
            ReverseResponse::Found(result) => Ok(result),
            ReverseResponse::NotFound { error } => Err(GeocodingError::Unavailable(error)),
        }
    }

    async fn search(&self, query: &str, limit: u8) -> GeocodingResult<Vec<NominatimPlace>> {
        let mut url = self.endpoint("search");
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("format", "json")
            .append_pair("limit", &limit.to_string());
        self.get_json(url).await
    }

    /// Forward geocoding: coordinates of the best match for `query`, if any.
    pub async fn geocode(&self, query: &str) -> GeocodingResult<Option<Coordinates>> {
        let Some(best) = self.search(query, 1).await?.into_iter().next() else {
            return Ok(None);
        };
        Ok(Some(Coordinates {
            latitude: parse_coordinate(&best.lat, "lat")?,
            longitude: parse_coordinate(&best.lon, "lon")?,
        }))
    }

    /// Place autocomplete. Queries shorter than two characters return nothing without a request.
    pub async fn search_places(&self, query: &str) -> GeocodingResult<Vec<NominatimPlace>> {
        if query.trim().chars().count() < 2 {
            return Ok(Vec::new());
        }
        self.search(query, SEARCH_LIMIT).await
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimClient {
    async fn reverse_geocode(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> GeocodingResult<GeocodedPlace> {
        let result = self.reverse(latitude, longitude).await?;
        Ok(place_from_reverse(&result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reverse_result(address: NominatimAddress) -> NominatimReverse {
        NominatimReverse {
            lat: "0".to_string(),
            lon: "0".to_string(),
            display_name: "Some Street 1, Some District, Some Country".to_string(),
            address,
        }
    }

    fn some(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    #[test]
    fn test_city_and_country() {
        let place = place_from_reverse(&reverse_result(NominatimAddress {
            city: some("Lisbon"),
            state: some("Lisbon"),
            country: some("Portugal"),
            ..NominatimAddress::default()
        }));
        assert_eq!(place.display_name, "Lisbon, Portugal");
        assert_eq!(place.city.as_deref(), Some("Lisbon"));
    }

    #[test]
    fn test_distinct_state_is_included() {
        let place = place_from_reverse(&reverse_result(NominatimAddress {
            city: some("San Francisco"),
            state: some("California"),
            country: some("United States"),
            ..NominatimAddress::default()
        }));
        assert_eq!(place.display_name, "San Francisco, California, United States");
    }

    #[test]
    fn test_town_village_and_county_stand_in_for_city() {
        let place = place_from_reverse(&reverse_result(NominatimAddress {
            village: some("Giethoorn"),
            county: some("Steenwijkerland"),
            country: some("Netherlands"),
            ..NominatimAddress::default()
        }));
        assert_eq!(place.display_name, "Giethoorn, Netherlands");

        let place = place_from_reverse(&reverse_result(NominatimAddress {
            county: some("Highland"),
            country: some("United Kingdom"),
            ..NominatimAddress::default()
        }));
        assert_eq!(place.city.as_deref(), Some("Highland"));
    }

    #[test]
    fn test_without_city_uses_display_name() {
        let place = place_from_reverse(&reverse_result(NominatimAddress {
            country: some("Antarctica"),
            ..NominatimAddress::default()
        }));
        assert_eq!(place.display_name, "Some Street 1, Some District, Some Country");
        assert_eq!(place.country.as_deref(), Some("Antarctica"));
    }

    #[test]
    fn test_reverse_response_variants() -> serde_json::Result<()> {
        let found: ReverseResponse = serde_json::from_str(
            r#"{"place_id":1,"lat":"52.37","lon":"4.89","display_name":"Amsterdam","address":{"city":"Amsterdam","country":"Nederland"}}"#,
        )?;
        assert!(matches!(found, ReverseResponse::Found(r) if r.address.city.as_deref() == Some("Amsterdam")));

        let missing: ReverseResponse = serde_json::from_str(r#"{"error":"Unable to geocode"}"#)?;
        assert!(matches!(missing, ReverseResponse::NotFound { error } if error == "Unable to geocode"));
        Ok(())
    }

    #[test]
    fn test_format_place() -> GeocodingResult<()> {
        let mut place = NominatimPlace {
            place_id: 42,
            name: some("Rijksmuseum"),
            display_name: "Rijksmuseum, Museumstraat 1, Amsterdam, Nederland".to_string(),
            lat: "52.36".to_string(),
            lon: "4.885".to_string(),
            place_type: some("museum"),
            class: some("tourism"),
            importance: Some(0.7),
            address: None,
        };
        let formatted = format_place(&place)?;
        assert_eq!(formatted.name, "Rijksmuseum");
        assert_eq!(formatted.place_id, 42);
        assert!((formatted.longitude - 4.885).abs() < 1e-12);

        place.name = some("");
        place.display_name = "Museumstraat 1, Amsterdam".to_string();
        assert_eq!(format_place(&place)?.name, "Museumstraat 1");

        place.lat = "north".to_string();
        assert!(matches!(
            format_place(&place),
            Err(GeocodingError::InvalidResponse(_))
        ));
        Ok(())
    }

    #[test]
    fn test_endpoint_keeps_base_path() -> GeocodingResult<()> {
        let client = NominatimClient::with_base_url("http://localhost:8080/nominatim/").build()?;
        assert_eq!(
            client.endpoint("reverse").as_str(),
            "http://localhost:8080/nominatim/reverse"
        );
        let client = NominatimClient::with_base_url(DEFAULT_NOMINATIM_URL).build()?;
        assert_eq!(
            client.endpoint("search").as_str(),
            "https://nominatim.openstreetmap.org/search"
        );
        Ok(())
    }
}
