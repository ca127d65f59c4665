//! HTML pages for the listings board.
//!
//! Every interpolated user value goes through [`escape`]. Listing bodies are
//! inserted as their stored `processed_html`, which the markdown renderer
//! already produced with raw HTML escaped.

use community_listings::{ClassifiedListing, ListingCategory, MAX_BODY_LENGTH, MAX_TITLE_LENGTH};
use community_org::Organization;
use community_service::ListingBoard;

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// The board at `/listings` or `/listings/:category_slug`.
pub fn board_page(board: &ListingBoard) -> String {
    let title = match &board.selected {
        Some(category) => format!("{} Listings", category.name),
        None => "Listings".to_string(),
    };

    let mut body = filters(&board.categories, board.selected.as_ref());
    body.push_str("<section class=\"classified-listings\">\n");
    if board.listings.is_empty() {
        body.push_str("<p class=\"classified-empty\">No listings yet.</p>\n");
    }
    for listing in &board.listings {
        let category = board.categories.iter().find(|c| c.id == listing.category_id);
        body.push_str(&listing_card(listing, category));
    }
    body.push_str("</section>\n");

    layout(&title, &body)
}

/// The form at `/listings/new`.
///
/// Field names follow the `classified_listing[...]` convention that
/// `POST /listings` accepts as a form body. `organizations` are the ones the
/// signed-in user may post for; `None` means nobody is signed in.
pub fn new_listing_page(
    categories: &[ListingCategory],
    organizations: Option<&[Organization]>,
) -> String {
    let mut body = filters(categories, None);

    if organizations.is_none() {
        body.push_str(
            "<p class=\"classified-sign-in\">Sign in to post a listing. \
             Posting spends one credit.</p>\n",
        );
    }

    body.push_str("<form class=\"new-classified-listing\" method=\"post\" action=\"/listings\">\n");
    body.push_str(&format!(
        "<label for=\"title\">Title</label>\n\
         <input type=\"text\" id=\"title\" name=\"{}\" maxlength=\"{}\" required>\n",
        field("title"),
        MAX_TITLE_LENGTH
    ));

    body.push_str(&format!(
        "<label for=\"category\">Category</label>\n<select id=\"category\" name=\"{}\">\n",
        field("classified_listing_category_id")
    ));
    for category in categories {
        body.push_str(&format!(
            "<option value=\"{}\">{}</option>\n",
            category.id,
            escape(&category.name)
        ));
    }
    body.push_str("</select>\n");
    for category in categories {
        if let Some(rules) = &category.rules {
            body.push_str(&format!(
                "<p class=\"category-rules\" data-category=\"{}\">{}</p>\n",
                escape(&category.slug),
                escape(rules)
            ));
        }
    }

    body.push_str(&format!(
        "<label for=\"body_markdown\">Body</label>\n\
         <textarea id=\"body_markdown\" name=\"{}\" maxlength=\"{}\" required></textarea>\n",
        field("body_markdown"),
        MAX_BODY_LENGTH
    ));
    body.push_str(&format!(
        "<label for=\"tag_list\">Tags</label>\n\
         <input type=\"text\" id=\"tag_list\" name=\"{}\">\n",
        field("tag_list")
    ));

    if let Some(organizations) = organizations.filter(|orgs| !orgs.is_empty()) {
        body.push_str(&format!(
            "<label for=\"organization_id\">Post for</label>\n\
             <select id=\"organization_id\" name=\"{}\">\n<option value=\"\">Myself</option>\n",
            field("organization_id")
        ));
        for org in organizations {
            body.push_str(&format!(
                "<option value=\"{}\">{}</option>\n",
                org.id,
                escape(&org.name)
            ));
        }
        body.push_str("</select>\n");
    }

    body.push_str("<button type=\"submit\">Post listing</button>\n</form>\n");

    layout("New Listing", &body)
}

fn field(name: &str) -> String {
    format!("classified_listing[{name}]")
}

fn filters(categories: &[ListingCategory], selected: Option<&ListingCategory>) -> String {
    let active = |is: bool| if is { " active" } else { "" };

    let mut out = String::from("<nav class=\"classified-filters\" id=\"classified-filters\">\n");
    out.push_str(&format!(
        "<a class=\"classified-filter{}\" href=\"/listings\">all</a>\n",
        active(selected.is_none())
    ));
    for category in categories {
        let is_selected = selected.is_some_and(|s| s.id == category.id);
        out.push_str(&format!(
            "<a class=\"classified-filter{}\" href=\"/listings/{}\">{}</a>\n",
            active(is_selected),
            escape(&category.slug),
            escape(&category.name)
        ));
    }
    out.push_str("<a class=\"classified-new\" href=\"/listings/new\">Create a Listing</a>\n");
    out.push_str("</nav>\n");
    out
}

fn listing_card(listing: &ClassifiedListing, category: Option<&ListingCategory>) -> String {
    let mut out = format!(
        "<article class=\"single-classified-listing\" id=\"listing-{}\">\n<h3>{}</h3>\n",
        listing.id,
        escape(&listing.title)
    );
    if let Some(category) = category {
        out.push_str(&format!(
            "<a class=\"listing-category\" href=\"/listings/{}\">{}</a>\n",
            escape(&category.slug),
            escape(&category.name)
        ));
    }
    out.push_str(&format!(
        "<div class=\"listing-body\">{}</div>\n",
        listing.processed_html
    ));
    if !listing.tags.is_empty() {
        out.push_str("<div class=\"listing-tags\">");
        for tag in listing.tags.as_slice() {
            out.push_str(&format!("<span class=\"tag\">#{}</span>", escape(tag)));
        }
        out.push_str("</div>\n");
    }
    out.push_str("</article>\n");
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n</head>\n<body>\n<main class=\"classifieds\">\n{}</main>\n</body>\n</html>\n",
        escape(title),
        body
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use community_listings::ListingDraft;
    use uuid::Uuid;

    fn board_with(listing_title: &str) -> ListingBoard {
        let category = ListingCategory::new("Jobs & Gigs", "jobs");
        let listing = ClassifiedListing::new(
            Uuid::now_v7(),
            ListingDraft {
                title: listing_title.to_string(),
                category_id: category.id,
                body_markdown: "**hiring** <script>x</script>".to_string(),
                tag_list: Some("rust".to_string()),
            },
        )
        .unwrap();

        ListingBoard {
            categories: vec![category],
            selected: None,
            listings: vec![listing],
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("<a href=\"x\">&'"), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn test_board_page_has_filters_and_escapes_titles() {
        let page = board_page(&board_with("<b>Rustacean</b>"));

        assert!(page.contains("classified-filters"));
        assert!(page.contains("Jobs &amp; Gigs"));
        assert!(page.contains("&lt;b&gt;Rustacean&lt;/b&gt;"));
        assert!(page.contains("<strong>hiring</strong>"));
        assert!(!page.contains("<script>"));
        assert!(page.contains("#rust"));
    }

    #[test]
    fn test_empty_board() {
        let page = board_page(&ListingBoard {
            categories: Vec::new(),
            selected: None,
            listings: Vec::new(),
        });

        assert!(page.contains("classified-filters"));
        assert!(page.contains("No listings yet."));
    }

    #[test]
    fn test_new_listing_page_signed_out() {
        let categories = vec![ListingCategory::new("Mentors", "mentors").with_rules("Be kind")];
        let page = new_listing_page(&categories, None);

        assert!(page.contains("classified-filters"));
        assert!(page.contains("classified-sign-in"));
        assert!(page.contains(&categories[0].id.to_string()));
        assert!(page.contains("Be kind"));
        assert!(page.contains("name=\"classified_listing[title]\""));
        assert!(page.contains("name=\"classified_listing[classified_listing_category_id]\""));
        assert!(!page.contains("classified_listing[organization_id]"));
    }

    #[test]
    fn test_new_listing_page_offers_organizations() {
        let categories = vec![ListingCategory::new("Jobs", "jobs")];
        let orgs = vec![Organization::new("Acme <Labs>", "acme").unwrap()];
        let page = new_listing_page(&categories, Some(&orgs));

        assert!(!page.contains("classified-sign-in"));
        assert!(page.contains("name=\"classified_listing[organization_id]\""));
        assert!(page.contains(&orgs[0].id.to_string()));
        assert!(page.contains("Acme &lt;Labs&gt;"));
    }
}
