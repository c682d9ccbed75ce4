use hypertext::prelude::*;

use crate::{
    entities::movie,
    forms::{AddForm, FieldErrors, RateForm},
    models::Candidate,
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

const INPUT_CLASS: &str = "mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500";
const BUTTON_CLASS: &str =
    "w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700";

/// Movies arrive ascending by rating; the list shows the top ranking first.
pub fn list_page(movies: &[movie::Model]) -> String {
    page(
        "My Top Movies",
        maud! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-4xl mx-auto px-6 py-12" {
                    div class="flex items-start justify-between gap-6" {
                        div {
                            h1 class="text-3xl font-bold text-gray-900" { "My Top Movies" }
                            p class="mt-2 text-gray-600" { "These are my all-time favourite movies." }
                        }
                        a class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" href="/add" { "Add Movie" }
                    }

                    @if movies.is_empty() {
                        div class="mt-10 bg-white shadow rounded-lg p-8" {
                            p class="text-gray-600" { "No movies yet. Add one to start your list." }
                        }
                    } @else {
                        div class="mt-10 space-y-4" {
                            @for movie in movies.iter().rev() {
                                div class="bg-white shadow rounded-lg p-6 flex gap-6" {
                                    img class="w-32 rounded object-cover" src=(movie.img_url) alt=(movie.title);
                                    div class="flex-1" {
                                        div class="flex items-start justify-between gap-4" {
                                            h2 class="text-xl font-semibold text-gray-900" {
                                                (movie.title)
                                                @if let Some(year) = movie.year {
                                                    span class="ml-2 font-normal text-gray-500" { (format!("({year})")) }
                                                }
                                            }
                                            @if let Some(ranking) = movie.ranking {
                                                span class="text-3xl font-bold text-gray-300" { (format!("#{ranking}")) }
                                            }
                                        }
                                        p class="mt-1 text-sm font-medium text-yellow-600" { (format!("{:.1} / 10", movie.rating)) }
                                        @if let Some(review) = &movie.review {
                                            p class="mt-2 italic text-gray-700" { (format!("\u{201c}{review}\u{201d}")) }
                                        }
                                        p class="mt-2 text-sm text-gray-600" { (movie.description) }
                                        div class="mt-4 flex gap-4 text-sm" {
                                            a class="text-blue-600 hover:text-blue-800" href=(format!("/edit/{}", movie.id)) { "Update" }
                                            a class="text-red-600 hover:text-red-800" href=(format!("/delete/{}", movie.id)) { "Delete" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn add_page(form: &AddForm, errors: &FieldErrors) -> String {
    page(
        "Add Movie",
        maud! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-2xl mx-auto px-6 py-12" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-3xl font-bold text-gray-900" { "Add a Movie" }

                        form class="mt-8 space-y-6" method="post" action="/add" {
                            div {
                                label class="block text-sm font-medium text-gray-700" {
                                    "Movie title"
                                    input class=(INPUT_CLASS) name="title" value=(form.title) required;
                                }
                                @if let Some(message) = errors.get("title") {
                                    p class="mt-2 text-sm text-red-600" { (message) }
                                }
                            }

                            button class=(BUTTON_CLASS) { "Add Movie" }
                        }
                        a class="mt-6 inline-block text-sm text-blue-600 hover:text-blue-800" href="/" { "Back to list" }
                    }
                }
            }
        },
    )
}

pub fn select_page(query: &str, candidates: &[Candidate]) -> String {
    page(
        "Select Movie",
        maud! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-3xl mx-auto px-6 py-12" {
                    div class="flex items-start justify-between gap-6" {
                        div {
                            h1 class="text-3xl font-bold text-gray-900" { "Select Movie" }
                            p class="mt-2 text-gray-600" { (format!("Results for \u{201c}{query}\u{201d}")) }
                        }
                        a class="text-sm text-blue-600 hover:text-blue-800" href="/add" { "New search" }
                    }

                    @if candidates.is_empty() {
                        div class="mt-10 bg-white shadow rounded-lg p-8" {
                            p class="text-gray-600" { "No movies matched that title." }
                        }
                    } @else {
                        ul class="mt-10 divide-y divide-gray-200 bg-white shadow rounded-lg" {
                            @for candidate in candidates {
                                li class="flex items-center justify-between gap-4 px-6 py-4" {
                                    a class="text-blue-600 hover:text-blue-800" href=(format!("/add/movie/{}", candidate.result.id)) {
                                        (candidate.result.title)
                                        @if let Some(year) = candidate.result.year() {
                                            span class="ml-2 text-gray-500" { (format!("({year})")) }
                                        }
                                    }
                                    @if let Some(id) = candidate.existing_id {
                                        a class="text-xs text-gray-500 hover:text-gray-700" href=(format!("/edit/{id}")) { "Already in your list" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn edit_page(movie: &movie::Model, form: &RateForm, errors: &FieldErrors) -> String {
    page(
        "Edit Movie",
        maud! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-2xl mx-auto px-6 py-12" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-3xl font-bold text-gray-900" { (movie.title) }
                        p class="mt-2 text-gray-600" { "Edit movie rating" }

                        form class="mt-8 space-y-6" method="post" action=(format!("/edit/{}", movie.id)) {
                            div {
                                label class="block text-sm font-medium text-gray-700" {
                                    "Your rating out of 10 e.g. 7.5"
                                    input class=(INPUT_CLASS) name="rating" value=(form.rating) required;
                                }
                                @if let Some(message) = errors.get("rating") {
                                    p class="mt-2 text-sm text-red-600" { (message) }
                                }
                            }

                            div {
                                label class="block text-sm font-medium text-gray-700" {
                                    "Your review"
                                    textarea class=(INPUT_CLASS) name="review" rows="4" required { (form.review) }
                                }
                                @if let Some(message) = errors.get("review") {
                                    p class="mt-2 text-sm text-red-600" { (message) }
                                }
                            }

                            button class=(BUTTON_CLASS) { "Done" }
                        }
                        a class="mt-6 inline-block text-sm text-blue-600 hover:text-blue-800" href="/" { "Back to list" }
                    }
                }
            }
        },
    )
}

pub fn error_page(message: &str) -> String {
    page(
        "Error",
        maud! {
            div class="min-h-screen bg-gray-50 flex items-center justify-center" {
                div class="max-w-xl w-full px-6" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-2xl font-bold text-gray-900" { "Error" }
                        p class="mt-4 text-gray-700" { (message) }
                        a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
                    }
                }
            }
        },
    )
}

fn page(title: &str, body: impl Renderable) -> String {
    let document = maud! {
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body { (body) }
        }
    }
    .render();
    format!("<!DOCTYPE html>{}", document.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: i32, title: &str, rating: f64, ranking: i32) -> movie::Model {
        movie::Model {
            id,
            title: title.to_string(),
            year: Some(2001),
            release_date: "2001-07-20".to_string(),
            description: "A description".to_string(),
            rating,
            ranking: Some(ranking),
            review: None,
            img_url: "https://image.tmdb.org/t/p/original/x.jpg".to_string(),
        }
    }

    #[test]
    fn list_shows_best_ranking_first() {
        let movies = vec![movie(2, "Worse", 6.0, 1), movie(1, "Better", 9.0, 2)];
        let html = list_page(&movies);
        let better = html.find("Better").unwrap();
        let worse = html.find("Worse").unwrap();
        assert!(better < worse);
        assert!(html.contains("/edit/1"));
        assert!(html.contains("/delete/2"));
    }

    #[test]
    fn escapes_user_text() {
        let form = RateForm { rating: "7".to_string(), review: "<b>loud</b>".to_string() };
        let html = edit_page(&movie(4, "Heat", 7.0, 1), &form, &FieldErrors::default());
        assert!(!html.contains("<b>loud</b>"));
        assert!(html.contains("&lt;b&gt;loud&lt;/b&gt;"));
    }

    #[test]
    fn edit_form_shows_field_errors() {
        let form = RateForm { rating: "11".to_string(), review: "ok".to_string() };
        let errors = form.validate().unwrap_err();
        let html = edit_page(&movie(3, "Amélie", 8.3, 1), &form, &errors);
        assert!(html.contains("Rating must be between 0 and 10."));
        assert!(html.contains("value=\"11\""));
        assert!(html.contains("action=\"/edit/3\""));
    }
}
