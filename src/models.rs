use crate::tmdb::SearchResult;

/// A movie fetched from TMDB, ready to be stored. Ranking and review are
/// filled in later by the list and edit flows.
#[derive(Clone, Debug, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub year: Option<i32>,
    pub release_date: String,
    pub description: String,
    pub rating: f64,
    pub img_url: String,
}

/// A search hit shown on the selection page, with the id of the stored movie
/// carrying the same title, if any.
#[derive(Clone, Debug)]
pub struct Candidate {
    pub result: SearchResult,
    pub existing_id: Option<i32>,
}
