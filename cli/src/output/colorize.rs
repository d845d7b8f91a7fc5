use owo_colors::OwoColorize;
use thumbmark::models::Bookmark;
use thumbmark::thumbnails::ThumbnailStore;

pub trait Colorize {
    fn to_colored(&self) -> String;
}

pub struct ColorizeBookmark<'a>(pub &'a Bookmark, pub &'a ThumbnailStore);

impl<'a> Colorize for ColorizeBookmark<'a> {
    fn to_colored(&self) -> String {
        let mut s = String::new();
        let id = self.0.id.to_string();
        s.push_str(&format!("{}. {}\n", id.bright_blue(), self.0.url.yellow()));

        // padding for alignment
        let padding = id.len() + 3;
        match &self.0.thumbnail {
            Some(reference) => s.push_str(&format!(
                "{:>padding$} {}\n",
                "@".red(),
                self.1.resolve(reference).display().green()
            )),
            None => s.push_str(&format!(
                "{:>padding$} {}\n",
                "@".red(),
                "(no thumbnail)".dimmed()
            )),
        }
        s
    }
}
