//! Form parsing and validation
//!
//! Submissions arrive as `application/x-www-form-urlencoded` bodies. The
//! genre multi-select repeats its key, so bodies are decoded into ordered
//! pairs rather than a map. Each form keeps the raw submitted strings so an
//! invalid submission can be rendered back unchanged.

use chrono::NaiveDateTime;
use fyyur_common::db::models::{Artist, ArtistDraft, ShowDraft, Venue, VenueDraft};
use fyyur_common::genres::GENRE_CHOICES;
use fyyur_common::time::{format_show_time, now, parse_show_time};
use fyyur_common::Genres;
use std::collections::BTreeMap;

pub const STATE_CHOICES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH",
    "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

/// Decoded form body
#[derive(Debug, Clone, Default)]
pub struct FormFields {
    pairs: Vec<(String, String)>,
}

impl FormFields {
    pub fn parse(body: &[u8]) -> Self {
        FormFields {
            pairs: url::form_urlencoded::parse(body).into_owned().collect(),
        }
    }

    /// First value for `key`, trimmed; empty when absent
    pub fn text(&self, key: &str) -> String {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.trim().to_string())
            .unwrap_or_default()
    }

    /// First value for `key` exactly as submitted; empty when absent
    pub fn raw(&self, key: &str) -> &str {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }

    /// Every value submitted under `key`, in order
    pub fn all(&self, key: &str) -> Vec<String> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.trim().to_string())
            .collect()
    }

    /// Checkbox semantics: present with a truthy value
    pub fn flag(&self, key: &str) -> bool {
        matches!(
            self.text(key).to_ascii_lowercase().as_str(),
            "y" | "yes" | "on" | "true" | "1"
        )
    }
}

/// Field name -> message, ordered by field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// One-line description for logs and notices
    pub fn summary(&self) -> String {
        self.0
            .iter()
            .map(|(field, msg)| format!("{}: {}", field, msg))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Outcome of validating a submission: either a draft ready to store or the
/// per-field errors
pub type Validated<T> = std::result::Result<T, FieldErrors>;

fn optional(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn require(errors: &mut FieldErrors, field: &'static str, value: &str) {
    if value.is_empty() {
        errors.add(field, "This field is required.");
    }
}

fn check_state(errors: &mut FieldErrors, value: &str) {
    require(errors, "state", value);
    if !value.is_empty() && !STATE_CHOICES.contains(&value) {
        errors.add("state", "Not a valid choice.");
    }
}

fn check_genres(errors: &mut FieldErrors, values: &[String]) {
    let genres = Genres::new(values);
    if genres.is_empty() {
        errors.add("genres", "Select at least one genre.");
    } else if let Some(bad) = genres.iter().find(|g| !GENRE_CHOICES.contains(&g.as_str())) {
        errors.add("genres", format!("'{}' is not a valid choice.", bad));
    }
}

fn check_link(errors: &mut FieldErrors, field: &'static str, value: &str) {
    if value.is_empty() {
        return;
    }
    match url::Url::parse(value) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") && parsed.host().is_some() => {}
        _ => errors.add(field, "Invalid URL."),
    }
}

/// Digits with common separators; at least seven digits
fn check_phone(errors: &mut FieldErrors, value: &str) {
    if value.is_empty() {
        return;
    }
    let allowed = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '.' | '(' | ')' | '+'));
    let digits = value.chars().filter(char::is_ascii_digit).count();
    if !allowed || digits < 7 {
        errors.add("phone", "Invalid phone number.");
    }
}

/// Venue form as submitted
#[derive(Debug, Clone, Default)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: String,
    pub genres: Vec<String>,
    pub facebook_link: String,
    pub website_link: String,
    pub seeking_talent: bool,
    pub seeking_description: String,
}

impl VenueForm {
    pub fn from_fields(fields: &FormFields) -> Self {
        VenueForm {
            name: fields.text("name"),
            city: fields.text("city"),
            state: fields.text("state"),
            address: fields.text("address"),
            phone: fields.text("phone"),
            image_link: fields.text("image_link"),
            genres: fields.all("genres"),
            facebook_link: fields.text("facebook_link"),
            website_link: fields.text("website_link"),
            seeking_talent: fields.flag("seeking_talent"),
            seeking_description: fields.text("seeking_description"),
        }
    }

    /// Prefill for the edit page
    pub fn from_venue(venue: &Venue) -> Self {
        VenueForm {
            name: venue.name.clone(),
            city: venue.city.clone().unwrap_or_default(),
            state: venue.state.clone().unwrap_or_default(),
            address: venue.address.clone().unwrap_or_default(),
            phone: venue.phone.clone().unwrap_or_default(),
            image_link: venue.image_link.clone().unwrap_or_default(),
            genres: venue.genres.as_slice().to_vec(),
            facebook_link: venue.facebook_link.clone().unwrap_or_default(),
            website_link: venue.website.clone().unwrap_or_default(),
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Validated<VenueDraft> {
        let mut errors = FieldErrors::default();
        require(&mut errors, "name", &self.name);
        require(&mut errors, "city", &self.city);
        check_state(&mut errors, &self.state);
        require(&mut errors, "address", &self.address);
        check_phone(&mut errors, &self.phone);
        check_genres(&mut errors, &self.genres);
        check_link(&mut errors, "image_link", &self.image_link);
        check_link(&mut errors, "facebook_link", &self.facebook_link);
        check_link(&mut errors, "website_link", &self.website_link);

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(VenueDraft {
            name: self.name.clone(),
            city: optional(&self.city),
            state: optional(&self.state),
            address: optional(&self.address),
            phone: optional(&self.phone),
            website: optional(&self.website_link),
            image_link: optional(&self.image_link),
            facebook_link: optional(&self.facebook_link),
            seeking_talent: self.seeking_talent,
            seeking_description: optional(&self.seeking_description),
            genres: Genres::new(&self.genres),
        })
    }
}

/// Artist form as submitted
#[derive(Debug, Clone, Default)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub image_link: String,
    pub genres: Vec<String>,
    pub facebook_link: String,
    pub website_link: String,
    pub seeking_venue: bool,
    pub seeking_description: String,
}

impl ArtistForm {
    pub fn from_fields(fields: &FormFields) -> Self {
        ArtistForm {
            name: fields.text("name"),
            city: fields.text("city"),
            state: fields.text("state"),
            phone: fields.text("phone"),
            image_link: fields.text("image_link"),
            genres: fields.all("genres"),
            facebook_link: fields.text("facebook_link"),
            website_link: fields.text("website_link"),
            seeking_venue: fields.flag("seeking_venue"),
            seeking_description: fields.text("seeking_description"),
        }
    }

    pub fn from_artist(artist: &Artist) -> Self {
        ArtistForm {
            name: artist.name.clone(),
            city: artist.city.clone().unwrap_or_default(),
            state: artist.state.clone().unwrap_or_default(),
            phone: artist.phone.clone().unwrap_or_default(),
            image_link: artist.image_link.clone().unwrap_or_default(),
            genres: artist.genres.as_slice().to_vec(),
            facebook_link: artist.facebook_link.clone().unwrap_or_default(),
            website_link: artist.website.clone().unwrap_or_default(),
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Validated<ArtistDraft> {
        let mut errors = FieldErrors::default();
        require(&mut errors, "name", &self.name);
        require(&mut errors, "city", &self.city);
        check_state(&mut errors, &self.state);
        check_phone(&mut errors, &self.phone);
        check_genres(&mut errors, &self.genres);
        check_link(&mut errors, "image_link", &self.image_link);
        check_link(&mut errors, "facebook_link", &self.facebook_link);
        check_link(&mut errors, "website_link", &self.website_link);

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ArtistDraft {
            name: self.name.clone(),
            city: optional(&self.city),
            state: optional(&self.state),
            phone: optional(&self.phone),
            website: optional(&self.website_link),
            image_link: optional(&self.image_link),
            facebook_link: optional(&self.facebook_link),
            seeking_venue: self.seeking_venue,
            seeking_description: optional(&self.seeking_description),
            genres: Genres::new(&self.genres),
        })
    }
}

/// Show form as submitted
#[derive(Debug, Clone)]
pub struct ShowForm {
    pub artist_id: String,
    pub venue_id: String,
    pub start_time: String,
}

impl Default for ShowForm {
    /// Start time defaults to the current time
    fn default() -> Self {
        ShowForm {
            artist_id: String::new(),
            venue_id: String::new(),
            start_time: format_show_time(&now()),
        }
    }
}

impl ShowForm {
    pub fn from_fields(fields: &FormFields) -> Self {
        ShowForm {
            artist_id: fields.text("artist_id"),
            venue_id: fields.text("venue_id"),
            start_time: fields.text("start_time"),
        }
    }

    pub fn validate(&self) -> Validated<ShowDraft> {
        let mut errors = FieldErrors::default();

        let artist_id = parse_id(&mut errors, "artist_id", &self.artist_id);
        let venue_id = parse_id(&mut errors, "venue_id", &self.venue_id);

        require(&mut errors, "start_time", &self.start_time);
        let start_time: Option<NaiveDateTime> = parse_show_time(&self.start_time);
        if start_time.is_none() {
            errors.add("start_time", "Not a valid datetime value.");
        }

        match (artist_id, venue_id, start_time) {
            (Some(artist_id), Some(venue_id), Some(start_time)) if errors.is_empty() => {
                Ok(ShowDraft {
                    venue_id,
                    artist_id,
                    start_time,
                })
            }
            _ => Err(errors),
        }
    }
}

fn parse_id(errors: &mut FieldErrors, field: &'static str, value: &str) -> Option<i64> {
    require(errors, field, value);
    match value.parse::<i64>() {
        Ok(id) if id > 0 => Some(id),
        _ => {
            errors.add(field, "Must be a positive whole number.");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(body: &str) -> FormFields {
        FormFields::parse(body.as_bytes())
    }

    const VALID_VENUE: &str = "name=The+Musical+Hop&city=San+Francisco&state=CA\
        &address=1015+Folsom+Street&phone=123-123-1234&genres=Jazz&genres=Reggae\
        &genres=Jazz&facebook_link=https%3A%2F%2Fwww.facebook.com%2FTheMusicalHop\
        &seeking_talent=y&seeking_description=We+are+on+the+lookout";

    #[test]
    fn test_repeated_fields_keep_order() {
        let f = fields("genres=Jazz&genres=Folk&name=x");
        assert_eq!(f.all("genres"), vec!["Jazz", "Folk"]);
        assert_eq!(f.text("name"), "x");
        assert_eq!(f.text("missing"), "");
    }

    #[test]
    fn test_raw_keeps_whitespace() {
        let f = fields("search_term=+Hop+&name=+x");
        assert_eq!(f.raw("search_term"), " Hop ");
        assert_eq!(f.text("name"), "x");
        assert_eq!(f.raw("missing"), "");
    }

    #[test]
    fn test_flag_values() {
        assert!(fields("seeking_talent=y").flag("seeking_talent"));
        assert!(fields("seeking_talent=on").flag("seeking_talent"));
        assert!(!fields("seeking_talent=").flag("seeking_talent"));
        assert!(!fields("").flag("seeking_talent"));
    }

    #[test]
    fn test_valid_venue_normalizes() {
        let draft = VenueForm::from_fields(&fields(VALID_VENUE)).validate().unwrap();

        assert_eq!(draft.name, "The Musical Hop");
        assert_eq!(draft.genres.as_slice(), &["Jazz", "Reggae"]);
        assert!(draft.seeking_talent);
        assert_eq!(draft.website, None);
        assert_eq!(
            draft.facebook_link.as_deref(),
            Some("https://www.facebook.com/TheMusicalHop")
        );
    }

    #[test]
    fn test_venue_missing_fields() {
        let errors = VenueForm::from_fields(&fields("name=&state=ZZ"))
            .validate()
            .unwrap_err();

        assert_eq!(errors.get("name"), Some("This field is required."));
        assert!(errors.get("city").is_some());
        assert_eq!(errors.get("state"), Some("Not a valid choice."));
        assert!(errors.get("address").is_some());
        assert!(errors.get("genres").is_some());
    }

    #[test]
    fn test_unknown_genre_rejected() {
        let body = VALID_VENUE.replace("genres=Reggae", "genres=Polka");
        let errors = VenueForm::from_fields(&fields(&body)).validate().unwrap_err();
        assert_eq!(errors.get("genres"), Some("'Polka' is not a valid choice."));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_bad_links_and_phone() {
        let body = "name=Guns&city=SF&state=CA&genres=Rock+n+Roll\
            &image_link=not+a+url&website_link=ftp%3A%2F%2Fexample.com&phone=call+me";
        let errors = ArtistForm::from_fields(&fields(body)).validate().unwrap_err();

        assert_eq!(errors.get("image_link"), Some("Invalid URL."));
        assert_eq!(errors.get("website_link"), Some("Invalid URL."));
        assert_eq!(errors.get("phone"), Some("Invalid phone number."));
        assert!(errors.summary().contains("image_link: Invalid URL."));
    }

    #[test]
    fn test_valid_artist() {
        let body = "name=Guns+N+Petals&city=San+Francisco&state=CA&phone=326-123-5000\
            &genres=Rock+n+Roll&website_link=https%3A%2F%2Fwww.gunsnpetalsband.com\
            &seeking_venue=y";
        let draft = ArtistForm::from_fields(&fields(body)).validate().unwrap();

        assert_eq!(draft.website.as_deref(), Some("https://www.gunsnpetalsband.com"));
        assert!(draft.seeking_venue);
        assert_eq!(draft.seeking_description, None);
    }

    #[test]
    fn test_show_form() {
        let draft = ShowForm::from_fields(&fields(
            "artist_id=4&venue_id=1&start_time=2026-05-21T21%3A30",
        ))
        .validate()
        .unwrap();
        assert_eq!(draft.artist_id, 4);
        assert_eq!(draft.venue_id, 1);
        assert_eq!(format_show_time(&draft.start_time), "2026-05-21 21:30:00");

        let errors = ShowForm::from_fields(&fields("artist_id=abc&venue_id=&start_time=soon"))
            .validate()
            .unwrap_err();
        assert!(errors.get("artist_id").is_some());
        assert_eq!(errors.get("venue_id"), Some("This field is required."));
        assert_eq!(errors.get("start_time"), Some("Not a valid datetime value."));
    }

    #[test]
    fn test_show_form_default_start_time_parses() {
        let form = ShowForm::default();
        assert!(parse_show_time(&form.start_time).is_some());
    }
}
