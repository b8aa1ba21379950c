use std::fmt;

use wayfare_types::truncate;

use crate::presentation::view_models::{CountryDetailViewModel, CountryPageViewModel, CreateView};
use crate::presentation::views::Style;

impl CreateView for CountryDetailViewModel {
    fn create_view<'a>(&'a self, style: Style) -> Box<dyn fmt::Display + 'a> {
        Box::new(CountryDetailView { data: self, style })
    }
}

struct CountryDetailView<'a> {
    data: &'a CountryDetailViewModel,
    style: Style,
}

impl fmt::Display for CountryDetailView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.data {
            CountryDetailViewModel::Loading => writeln!(f, "Loading..."),
            CountryDetailViewModel::NotFound { id } => {
                writeln!(f, "Country not found: {}", id)
            }
            CountryDetailViewModel::Ready(page) => self.fmt_page(f, page),
        }
    }
}

impl CountryDetailView<'_> {
    fn fmt_page(&self, f: &mut fmt::Formatter, page: &CountryPageViewModel) -> fmt::Result {
        let style = &self.style;

        writeln!(f, "{}", style.heading(&page.name))?;
        writeln!(f, "  Capital:  {}", page.capital)?;
        writeln!(f, "  Visa:     {}", page.visa)?;
        writeln!(f, "  Meal:     {}", page.prices.meal)?;
        writeln!(f, "  Beer:     {}", page.prices.beer)?;
        writeln!(f, "  Taxi:     {}", page.prices.taxi)?;
        writeln!(f, "  Safety:   {}", page.safety)?;
        writeln!(f, "  Airport:  {}", page.airport)?;

        if let Some(error) = &page.last_error {
            writeln!(f)?;
            writeln!(f, "{}", style.warn(&format!("! {}", error)))?;
        }

        writeln!(f)?;
        writeln!(f, "{}", style.heading("Upload Media"))?;
        if page.media.is_empty() {
            writeln!(f, "  {}", style.dim("(no media yet)"))?;
        }
        for item in &page.media {
            writeln!(f, "  {}  {}", style.accent(&item.url), style.dim(&item.id))?;
        }
        self.fmt_feed_issue(f, &page.feeds.media)?;

        writeln!(f)?;
        writeln!(f, "{}", style.heading("Comments"))?;
        if page.comments.is_empty() {
            writeln!(f, "  {}", style.dim("(no comments yet)"))?;
        }
        for comment in &page.comments {
            writeln!(
                f,
                "  - {}  {}",
                comment.text,
                style.dim(&format!("[{} {}]", comment.id, comment.created_at))
            )?;
        }
        self.fmt_feed_issue(f, &page.feeds.comments)?;

        writeln!(f)?;
        writeln!(f, "{}", style.heading("Sponsored Links"))?;
        for line in &page.sponsored_links {
            writeln!(f, "  {}", line)?;
        }
        Ok(())
    }

    fn fmt_feed_issue(&self, f: &mut fmt::Formatter, status: &str) -> fmt::Result {
        if status.starts_with("failed") {
            writeln!(f, "  {}", self.style.warn(&truncate(status, 72)))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::view_models::{
        CommentEntryViewModel, FeedsViewModel, MediaEntryViewModel, PricesViewModel,
    };

    fn thailand() -> CountryPageViewModel {
        CountryPageViewModel {
            id: "thailand".to_string(),
            name: "Thailand".to_string(),
            capital: "Bangkok".to_string(),
            visa: "30 days visa-free".to_string(),
            prices: PricesViewModel {
                meal: "$3".to_string(),
                beer: "$1.50".to_string(),
                taxi: "$0.50/km".to_string(),
            },
            safety: "Generally safe".to_string(),
            airport: "Suvarnabhumi (BKK)".to_string(),
            media: vec![],
            comments: vec![],
            sponsored_links: vec!["[Affiliate ad goes here]".to_string()],
            feeds: FeedsViewModel {
                comments: "live".to_string(),
                media: "live".to_string(),
            },
            last_error: None,
        }
    }

    fn render(vm: &CountryDetailViewModel) -> String {
        vm.create_view(Style::plain()).to_string()
    }

    #[test]
    fn test_ready_page_sections() {
        let mut page = thailand();
        page.media.push(MediaEntryViewModel {
            id: "m1".to_string(),
            url: "memory://media/thailand/beach.png".to_string(),
        });
        page.comments.push(CommentEntryViewModel {
            id: "c1".to_string(),
            text: "Great trip!".to_string(),
            created_at: "2026-03-01 14:05 UTC".to_string(),
        });

        let out = render(&CountryDetailViewModel::Ready(Box::new(page)));
        insta::assert_snapshot!(out, @r"
        Thailand
          Capital:  Bangkok
          Visa:     30 days visa-free
          Meal:     $3
          Beer:     $1.50
          Taxi:     $0.50/km
          Safety:   Generally safe
          Airport:  Suvarnabhumi (BKK)

        Upload Media
          memory://media/thailand/beach.png  m1

        Comments
          - Great trip!  [c1 2026-03-01 14:05 UTC]

        Sponsored Links
          [Affiliate ad goes here]
        ");
    }

    #[test]
    fn test_empty_lists_and_error_line() {
        let mut page = thailand();
        page.last_error = Some("Posting comment failed: Store unavailable: offline".to_string());
        page.feeds.comments = "failed: Store unavailable: listener revoked".to_string();

        let out = render(&CountryDetailViewModel::Ready(Box::new(page)));
        assert!(out.contains("(no media yet)"));
        assert!(out.contains("(no comments yet)"));
        assert!(out.contains("! Posting comment failed: Store unavailable: offline"));
        assert!(out.contains("failed: Store unavailable: listener revoked"));
    }

    #[test]
    fn test_loading_and_not_found() {
        assert_eq!(render(&CountryDetailViewModel::Loading), "Loading...\n");
        assert_eq!(
            render(&CountryDetailViewModel::NotFound {
                id: "atlantis".to_string()
            }),
            "Country not found: atlantis\n"
        );
    }
}
