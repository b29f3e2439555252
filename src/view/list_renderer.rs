use ramhorns::Content;

use crate::post::PostRecord;
use crate::post_list::PostCollection;
use crate::text_utils::format_date_time;
use crate::view::PageView;

#[derive(Content)]
pub struct ListPage {
    title: String,
    posts: Vec<PostItem>,
    post_count: u64,
}

#[derive(Content)]
struct PostItem {
    title: String,
    slug: String,
    link: String,
    date: String,
    time: String,
    content: String,
}

impl ListPage {
    pub fn new(title: &str, link_prefix: &str, collection: &PostCollection) -> ListPage {
        let posts: Vec<PostItem> = collection.iter()
            .map(|post| PostItem::from_post(link_prefix, post))
            .collect();

        ListPage {
            title: title.to_string(),
            post_count: posts.len() as u64,
            posts,
        }
    }
}

impl PageView for ListPage {
    fn page_title(&self) -> &str {
        &self.title
    }
}

impl PostItem {
    fn from_post(link_prefix: &str, post: &PostRecord) -> PostItem {
        let (date, time) = format_date_time(&post.date);
        PostItem {
            title: post.title.clone(),
            slug: post.slug.clone(),
            link: format!("{}{}", link_prefix, post.slug),
            date,
            time,
            content: post.content.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
    use ramhorns::Template;

    use super::*;
    use crate::test_data::HOME_TEMPLATE;

    fn post(slug: &str, title: &str, day: u32) -> PostRecord {
        PostRecord {
            title: title.to_string(),
            date: NaiveDateTime::new(
                NaiveDate::from_ymd_opt(2024, 2, day).unwrap(),
                NaiveTime::from_hms_opt(8, 15, 0).unwrap(),
            ),
            slug: slug.to_string(),
            content: "<p>x</p>".to_string(),
        }
    }

    #[test]
    fn render_list() {
        let collection = PostCollection::from_records(vec![
            post("older", "Older <post>", 1),
            post("newer", "Newer", 9),
        ]);
        let page = ListPage::new("My Blog", "/post/", &collection);
        assert_eq!(page.page_title(), "My Blog");

        let tpl = Template::new(HOME_TEMPLATE).unwrap();
        let res = tpl.render(&page);
        assert_eq!(res, "<h1>My Blog</h1>\
<a href=\"/post/newer\">Newer</a>[2024-02-09]\
<a href=\"/post/older\">Older &lt;post&gt;</a>[2024-02-01]");
    }

    #[test]
    fn render_empty_list() {
        let page = ListPage::new("Thoughts", "/post/", &PostCollection::default());
        let tpl = Template::new(HOME_TEMPLATE).unwrap();
        assert_eq!(tpl.render(&page), "<h1>Thoughts</h1>empty");
    }
}
