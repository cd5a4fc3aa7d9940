//! Link extraction and anchor injection.
//!
//! A post's `links` array mixes markdown image syntax (`![](url)`) and bare
//! URLs. Each entry is cleaned to a bare URL, classified as an inline image
//! by file extension, and wrapped as a clickable anchor inside the display
//! body.

/// An inline image discovered in a post's link list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageLink {
    /// URL to download the image from.
    pub source_url: String,
    /// Filename to cache it under, taken from the URL's last path segment.
    pub local_filename: String,
}

/// Result of scanning one post's links.
#[derive(Debug, Default)]
pub struct ExtractedLinks {
    /// Display body with one anchor injected per link entry.
    pub body: String,
    /// Image-type links, in link-list order.
    pub images: Vec<ImageLink>,
}

/// Scan `links` in order, injecting anchors into `body` and collecting
/// image assets.
///
/// Anchor injection wraps the first occurrence of the *raw* link text in
/// the cumulative body as `<a href="URL">URL</a>`, once per link entry. A
/// link that never appears in the body injects nothing; a link that is not
/// an image is still anchor-wrapped.
pub fn extract_links(body: &str, links: &[String]) -> ExtractedLinks {
    let mut out = ExtractedLinks {
        body: body.to_string(),
        images: Vec::new(),
    };

    for raw in links {
        let cleaned = clean_link_url(raw);

        if is_image_url(&cleaned) {
            out.images.push(ImageLink {
                local_filename: basename(&cleaned).to_string(),
                source_url: cleaned,
            });
        }

        let anchor = format!("<a href=\"{raw}\">{raw}</a>");
        out.body = out.body.replacen(raw.as_str(), &anchor, 1);
    }

    out
}

/// Strip the markdown image wrapper (`![](` prefix, `)` suffix) if present.
pub fn clean_link_url(link: &str) -> String {
    let link = link.strip_prefix("![](").unwrap_or(link);
    let link = link.strip_suffix(')').unwrap_or(link);
    link.to_string()
}

/// Image classification is a case-sensitive suffix match, no content-type
/// sniffing. `.PNG` does not count.
fn is_image_url(url: &str) -> bool {
    url.ends_with(".png") || url.ends_with(".jpg")
}

/// Text after the last `/` or `\` in the URL.
fn basename(url: &str) -> &str {
    url.rfind(['/', '\\']).map_or(url, |pos| &url[pos + 1..])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn cleans_markdown_image_wrapper() {
        assert_eq!(clean_link_url("![](https://pod/a.png)"), "https://pod/a.png");
        assert_eq!(clean_link_url("https://pod/a.png"), "https://pod/a.png");
    }

    #[test]
    fn classifies_png_and_jpg_only() {
        let links = owned(&[
            "![](https://pod/a.png)",
            "![](https://pod/b.jpg)",
            "![](https://pod/c.gif)",
            "https://pod/page",
        ]);
        let out = extract_links("", &links);
        assert_eq!(
            out.images,
            vec![
                ImageLink {
                    source_url: "https://pod/a.png".into(),
                    local_filename: "a.png".into(),
                },
                ImageLink {
                    source_url: "https://pod/b.jpg".into(),
                    local_filename: "b.jpg".into(),
                },
            ]
        );
    }

    #[test]
    fn uppercase_extension_is_not_an_image() {
        let out = extract_links("", &owned(&["https://pod/photo.PNG"]));
        assert!(out.images.is_empty());
    }

    #[test]
    fn filename_is_last_path_segment() {
        let out = extract_links("", &owned(&["![](https://pod/media/2024/a.png)"]));
        assert_eq!(out.images[0].local_filename, "a.png");
    }

    #[test]
    fn filename_splits_on_backslash_too() {
        let out = extract_links("", &owned(&["C:\\media\\a.jpg"]));
        assert_eq!(out.images[0].local_filename, "a.jpg");
    }

    #[test]
    fn anchor_wraps_first_occurrence_only() {
        let body = "see https://x and again https://x";
        let out = extract_links(body, &owned(&["https://x"]));
        assert_eq!(
            out.body,
            "see <a href=\"https://x\">https://x</a> and again https://x"
        );
    }

    #[test]
    fn anchor_uses_raw_link_text() {
        let body = "pic: ![](https://pod/a.png) done";
        let out = extract_links(body, &owned(&["![](https://pod/a.png)"]));
        assert_eq!(
            out.body,
            "pic: <a href=\"![](https://pod/a.png)\">![](https://pod/a.png)</a> done"
        );
        // The image asset still uses the cleaned URL.
        assert_eq!(out.images[0].source_url, "https://pod/a.png");
    }

    #[test]
    fn absent_link_injects_nothing() {
        let out = extract_links("no links here", &owned(&["https://elsewhere"]));
        assert_eq!(out.body, "no links here");
    }
}
