use std::{collections::BTreeMap, ops::RangeInclusive};

use maud::{DOCTYPE, Markup, html};

use crate::genres::GENRES;

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

pub fn chart_page(
    year: i16,
    years: RangeInclusive<i16>,
    counts: &BTreeMap<String, i64>,
) -> String {
    let total: i64 = counts.values().sum();
    let max = counts.values().copied().max().unwrap_or(0).max(1);

    page(
        "Movie Genre Distribution",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-3xl mx-auto px-6 py-12" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-3xl font-bold text-gray-900" { "Movie Genre Distribution" }
                        p class="mt-2 text-gray-600" {
                            "Well-rated movies of " (year) " by primary genre · " (total) " movies included"
                        }

                        form class="mt-6" method="get" action="/" {
                            label class="block text-sm font-medium text-gray-700" for="year" { "Year" }
                            select class="mt-2 rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500" name="year" id="year" onchange="this.form.submit()" {
                                @for y in years {
                                    option value=(y) selected[y == year] { (y) }
                                }
                            }
                        }

                        div class="mt-8 space-y-2" {
                            @for (_, name) in GENRES {
                                (genre_bar(name, counts.get(name).copied().unwrap_or(0), max))
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn error_page(message: String) -> String {
    page(
        "Error",
        html! {
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

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
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
    .into_string()
}

fn genre_bar(name: &str, count: i64, max: i64) -> Markup {
    let pct = (count as f64 / max as f64 * 100.0).round() as i64;

    html! {
        div class="flex items-center gap-3" {
            span class="w-36 shrink-0 text-sm text-gray-700 text-right" { (name) }
            div class="flex-1 bg-gray-100 rounded" {
                div class="h-5 rounded bg-blue-600" style=(format!("width: {pct}%")) {}
            }
            span class="w-10 text-sm text-gray-500" { (count) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_page_lists_every_genre_and_all_years() {
        let mut counts: BTreeMap<String, i64> =
            GENRES.iter().map(|(_, name)| (name.to_string(), 0)).collect();
        counts.insert("Drama".to_string(), 3);

        let html = chart_page(2018, 2016..=2020, &counts);
        for (_, name) in GENRES {
            assert!(html.contains(name), "missing genre {name}");
        }
        assert!(html.contains(r#"option value="2016""#));
        assert!(html.contains(r#"option value="2020""#));
        assert!(html.contains("3 movies included"));
    }
}
