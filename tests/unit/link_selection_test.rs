// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use opinion_scraper::domain::services::link_collector::{
    select_article_links, LinkFilter, DEFAULT_MAX_ARTICLES,
};

#[test]
fn test_default_bound_on_long_listing() {
    let filter = LinkFilter::new("/opinion/", ".html");
    let hrefs: Vec<String> = (1..=12)
        .flat_map(|i| {
            vec![
                format!("https://elpais.com/opinion/2024-06-{i:02}/columna.html"),
                format!("https://elpais.com/opinion/2024-06-{i:02}/"),
            ]
        })
        .collect();

    let links = select_article_links(&hrefs, &filter, DEFAULT_MAX_ARTICLES);

    assert_eq!(links.len(), DEFAULT_MAX_ARTICLES);
    assert_eq!(
        links[4].as_str(),
        "https://elpais.com/opinion/2024-06-05/columna.html"
    );
}

#[test]
fn test_other_sections_never_selected() {
    let filter = LinkFilter::new("/opinion/", ".html");
    let hrefs = [
        "https://elpais.com/internacional/2024-06-01/noticia.html",
        "https://elpais.com/opinion/2024-06-01/columna.htm",
        "https://elpais.com/opinion/tribunas/",
    ];

    assert!(select_article_links(hrefs, &filter, 5).is_empty());
}
