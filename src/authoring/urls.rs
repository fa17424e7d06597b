use crate::authoring::AuthoringError;
use crate::catalog::models::RoundDefinition;
use crate::geo::models::LatLng;
use url::Url;

const IMAGE_ID_PARAMS: [&str; 3] = ["pKey", "photoId", "image_id"];

/// What a pasted imagery URL tells about a location.
#[derive(Clone, Debug, PartialEq)]
pub struct ProviderLink {
    pub image_id: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// Returns `None` for blank lines, `#` comments and anything that isn't an absolute URL.
pub fn parse_provider_url(line: &str) -> Option<ProviderLink> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let url = Url::parse(line.strip_prefix('@').unwrap_or(line)).ok()?;

    let query_param = |name: &str| {
        url.query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    };
    let from_query = IMAGE_ID_PARAMS
        .iter()
        .find_map(|name| query_param(name).filter(|value| !value.is_empty()));
    let from_path = || {
        let segments = url
            .path_segments()?
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>();
        if segments.len() < 2 {
            return None;
        }
        segments
            .last()
            .filter(|segment| is_image_id_token(segment))
            .map(|segment| segment.to_string())
    };
    let coordinate = |name: &str| {
        query_param(name)
            .and_then(|value| value.trim().parse::<f64>().ok())
            .filter(|value| value.is_finite())
    };

    Some(ProviderLink {
        image_id: from_query.or_else(from_path),
        lat: coordinate("lat"),
        lng: coordinate("lng"),
    })
}

fn is_image_id_token(segment: &str) -> bool {
    segment
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Entry `index` (zero-based) built from `link`. The opponent guess starts out equal to the
/// answer and is meant to be edited by hand.
pub fn round_from_link(index: usize, link: &ProviderLink) -> RoundDefinition {
    let answer = match (link.lat, link.lng) {
        (Some(lat), Some(lng)) => LatLng::new(lat, lng),
        _ => LatLng::new(0.0, 0.0),
    };
    RoundDefinition {
        id: format!("custom_{}", index + 1),
        title: Some(String::new()),
        imagery_ref: link.image_id.clone().unwrap_or_default(),
        answer,
        opponent_guess: answer,
    }
}

pub fn urls_to_catalog(input: &str) -> Result<Vec<RoundDefinition>, AuthoringError> {
    let links = input
        .lines()
        .filter_map(parse_provider_url)
        .collect::<Vec<_>>();
    if links.is_empty() {
        return Err(AuthoringError::NoValidUrls);
    }
    let missing_ids = links.iter().filter(|link| link.image_id.is_none()).count();
    if missing_ids > 0 {
        tracing::warn!(
            "{missing_ids} URL(s) had no recognizable image id and were kept with an empty one."
        );
    }
    Ok(links
        .iter()
        .enumerate()
        .map(|(index, link)| round_from_link(index, link))
        .collect())
}
