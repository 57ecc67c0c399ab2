//! HTML listing page

use crate::error::ApiError;
use crate::storage::CafeOrder;
use crate::AppState;
use axum::{extract::State, response::Html};
use cafe_types::Cafe;
use std::fmt::Write;

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let cafes = state.db.list_cafes(CafeOrder::Name).await?;
    Ok(Html(render_index(&cafes)))
}

pub fn render_index(cafes: &[Cafe]) -> String {
    let mut page = String::from(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Cafes &amp; Wifi</title>\n</head>\n<body>\n<h1>Cafes &amp; Wifi</h1>\n",
    );

    if cafes.is_empty() {
        page.push_str("<p>No cafes registered yet.</p>\n");
    } else {
        page.push_str(
            "<table>\n<thead><tr><th></th><th>Cafe</th><th>Location</th><th>Seats</th>\
             <th>Amenities</th><th>Coffee</th></tr></thead>\n<tbody>\n",
        );
        for cafe in cafes {
            // Writing into a String cannot fail
            let _ = writeln!(
                page,
                "<tr><td><img src=\"{img}\" alt=\"{name}\" width=\"120\"></td>\
                 <td><a href=\"{map}\">{name}</a></td><td>{location}</td>\
                 <td>{seats}</td><td>{amenities}</td><td>{price}</td></tr>",
                img = escape(&cafe.img_url),
                name = escape(&cafe.name),
                map = escape(&cafe.map_url),
                location = escape(&cafe.location),
                seats = escape(&cafe.seats),
                amenities = cafe.amenities().join(", "),
                price = escape(&cafe.coffee_price),
            );
        }
        page.push_str("</tbody>\n</table>\n");
    }

    page.push_str("</body>\n</html>\n");
    page
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use cafe_types::NewCafe;

    fn cafe(name: &str) -> Cafe {
        NewCafe {
            name: name.to_string(),
            map_url: "https://maps.example/?q=a&b".to_string(),
            img_url: "https://img.example/a.jpg".to_string(),
            location: "Soho".to_string(),
            seats: "10-20".to_string(),
            has_toilet: false,
            has_wifi: true,
            has_sockets: true,
            can_take_calls: false,
            coffee_price: "£2.80".to_string(),
        }
        .with_id(1)
    }

    #[test]
    fn test_render_escapes_fields() {
        let page = render_index(&[cafe("<Tea & Toast>")]);

        assert!(page.contains("&lt;Tea &amp; Toast&gt;"));
        assert!(!page.contains("<Tea"));
        assert!(page.contains("href=\"https://maps.example/?q=a&amp;b\""));
        assert!(page.contains("<td>Wi-Fi, Sockets</td>"));
        assert!(page.contains("£2.80"));
    }

    #[test]
    fn test_render_empty() {
        let page = render_index(&[]);
        assert!(page.contains("No cafes registered yet."));
        assert!(!page.contains("<table>"));
    }
}
