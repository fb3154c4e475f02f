//! RSS 2.0 document rendering.

use chrono::{DateTime, NaiveDate, Utc};
use quick_xml::{
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
    Writer,
};

use crate::{context::Context, metadata::Post};

const ATOM_NAMESPACE: &str = "http://www.w3.org/2005/Atom";
const GENERATOR: &str = concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"));

fn build_date(now: DateTime<Utc>) -> String {
    now.format("%a, %d %b %Y %H:%M:%S +0000").to_string()
}

/// Only the calendar date is meaningful, so the time is always midnight.
fn pub_date(date: NaiveDate) -> String {
    date.format("%a, %d %b %Y 00:00:00 +0000").to_string()
}

fn text_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> std::io::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn write_item<W: std::io::Write>(
    writer: &mut Writer<W>,
    post: &Post,
    ctx: &Context,
) -> std::io::Result<()> {
    writer.write_event(Event::Start(BytesStart::new("item")))?;
    text_element(writer, "title", &post.title)?;
    text_element(writer, "link", &post.link)?;
    text_element(writer, "description", &post.description)?;
    text_element(writer, "pubDate", &pub_date(post.date))?;
    text_element(writer, "guid", &post.link)?;
    text_element(writer, "author", &ctx.author_email)?;
    writer.write_event(Event::End(BytesEnd::new("item")))?;
    Ok(())
}

/// Renders `posts` as an RSS 2.0 feed, newest first. Posts sharing a date keep
/// their input order.
pub(crate) fn render_feed(
    posts: &[Post],
    ctx: &Context,
    now: DateTime<Utc>,
) -> anyhow::Result<String> {
    let mut sorted: Vec<&Post> = posts.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));

    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", None, None)))?;

    let mut rss = BytesStart::new("rss");
    rss.push_attribute(("version", "2.0"));
    rss.push_attribute(("xmlns:atom", ATOM_NAMESPACE));
    writer.write_event(Event::Start(rss))?;
    writer.write_event(Event::Start(BytesStart::new("channel")))?;

    text_element(&mut writer, "title", &ctx.site_title)?;
    text_element(&mut writer, "link", &ctx.site_url)?;
    text_element(&mut writer, "description", &ctx.site_description)?;
    text_element(&mut writer, "language", "en-us")?;
    text_element(&mut writer, "lastBuildDate", &build_date(now))?;
    text_element(&mut writer, "generator", GENERATOR)?;

    let feed_url = ctx.feed_url();
    let mut self_link = BytesStart::new("atom:link");
    self_link.push_attribute(("href", feed_url.as_str()));
    self_link.push_attribute(("rel", "self"));
    self_link.push_attribute(("type", "application/rss+xml"));
    writer.write_event(Event::Empty(self_link))?;

    for post in sorted {
        write_item(&mut writer, post, ctx)?;
    }

    writer.write_event(Event::End(BytesEnd::new("channel")))?;
    writer.write_event(Event::End(BytesEnd::new("rss")))?;

    let mut xml = String::from_utf8(writer.into_inner())?;
    xml.push('\n');
    Ok(xml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use quick_xml::Reader;

    fn post(filename: &str, date: (i32, u32, u32)) -> Post {
        let ctx = Context::default();
        Post {
            title: filename.to_string(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            description: format!("About {filename}"),
            filename: filename.to_string(),
            link: ctx.post_link(filename),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 8, 5, 9).unwrap()
    }

    fn pub_dates(xml: &str) -> Vec<&str> {
        xml.split("<pubDate>")
            .skip(1)
            .filter_map(|s| s.split("</pubDate>").next())
            .collect()
    }

    #[test]
    fn test_items_sorted_newest_first() {
        let posts = vec![
            post("jan", (2026, 1, 1)),
            post("mar", (2026, 3, 1)),
            post("feb", (2026, 2, 1)),
        ];
        let xml = render_feed(&posts, &Context::default(), now()).unwrap();
        assert_eq!(
            pub_dates(&xml),
            vec![
                "Sun, 01 Mar 2026 00:00:00 +0000",
                "Sun, 01 Feb 2026 00:00:00 +0000",
                "Thu, 01 Jan 2026 00:00:00 +0000",
            ]
        );
    }

    #[test]
    fn test_same_date_keeps_input_order() {
        let posts = vec![
            post("first", (2026, 1, 1)),
            post("newer", (2026, 5, 1)),
            post("second", (2026, 1, 1)),
        ];
        let xml = render_feed(&posts, &Context::default(), now()).unwrap();
        let first = xml.find("post=first").unwrap();
        let second = xml.find("post=second").unwrap();
        let newer = xml.find("post=newer").unwrap();
        assert!(newer < first && first < second);
    }

    #[test]
    fn test_channel_header() {
        let ctx = Context::default();
        let xml = render_feed(&[], &ctx, now()).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\"?>\n<rss version=\"2.0\""));

        let expected = concat!(
            "  <channel>\n",
            "    <title>Developer Logs</title>\n",
            "    <link>https://example.com</link>\n",
            "    <description>Technical notes, tutorials, and insights.</description>\n",
            "    <language>en-us</language>\n",
            "    <lastBuildDate>Sat, 17 Oct 2026 08:05:09 +0000</lastBuildDate>\n",
        );
        assert!(xml.contains(expected), "{xml}");
        assert!(xml.contains(
            "<atom:link href=\"https://example.com/feed.xml\" rel=\"self\" type=\"application/rss+xml\"/>"
        ));
        assert!(xml.contains(&format!("<generator>{GENERATOR}</generator>")));
    }

    #[test]
    fn test_item_fields() {
        let ctx = Context::default();
        let xml = render_feed(&[post("hello-world", (2026, 1, 26))], &ctx, now()).unwrap();
        let link = "https://example.com/logs/viewer.html?post=hello-world";
        assert!(xml.contains(&format!("<link>{link}</link>")));
        assert!(xml.contains(&format!("<guid>{link}</guid>")));
        assert!(xml.contains("<author>author@example.com</author>"));
        assert!(xml.contains("<pubDate>Mon, 26 Jan 2026 00:00:00 +0000</pubDate>"));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut p = post("amp", (2026, 1, 1));
        p.title = "Tom & Jerry <3".to_string();
        let xml = render_feed(&[p], &Context::default(), now()).unwrap();
        assert!(xml.contains("<title>Tom &amp; Jerry &lt;3</title>"));
    }

    #[test]
    fn test_output_is_well_formed() {
        let mut posts = vec![
            post("a", (2026, 1, 1)),
            post("b", (2025, 1, 1)),
            post("c", (2024, 1, 1)),
        ];
        posts[1].description = "x < y && \"quoted\" 'text'".to_string();
        let xml = render_feed(&posts, &Context::default(), now()).unwrap();

        let mut reader = Reader::from_str(&xml);
        let (mut channels, mut items, mut depth) = (0, 0, 0i32);
        loop {
            match reader.read_event().unwrap() {
                Event::Start(e) => {
                    depth += 1;
                    match e.name().as_ref() {
                        b"channel" => channels += 1,
                        b"item" => items += 1,
                        _ => {}
                    }
                }
                Event::End(_) => depth -= 1,
                Event::Eof => break,
                _ => {}
            }
        }
        assert_eq!(depth, 0);
        assert_eq!(channels, 1);
        assert_eq!(items, 3);
    }
}
