use serde_json::{json, Value};

pub fn anilist_media(english: Option<&str>, romaji: &str, cover: Option<&str>) -> Value {
    let cover_image = cover.map(|url| json!({ "extraLarge": null, "large": url, "medium": null }));
    json!({
        "data": {
            "Media": {
                "id": 2167,
                "idMal": 2167,
                "title": { "romaji": romaji, "english": english, "native": null },
                "coverImage": cover_image
            }
        }
    })
}

pub fn anilist_not_found() -> Value {
    json!({
        "data": { "Media": null },
        "errors": [{ "message": "Not Found.", "status": 404 }]
    })
}

pub fn jikan_anime(mal_id: u32, title: &str, large_image: Option<&str>) -> Value {
    json!({
        "data": {
            "mal_id": mal_id,
            "title": title,
            "images": {
                "jpg": {
                    "image_url": format!("https://cdn.myanimelist.net/images/anime/{}.jpg", mal_id),
                    "small_image_url": null,
                    "large_image_url": large_image
                }
            }
        }
    })
}

pub fn kitsu_results(entries: &[(&str, &str, Option<&str>)]) -> Value {
    let data: Vec<Value> = entries
        .iter()
        .map(|(id, title, poster)| {
            let poster_image = poster.map(|url| json!({ "original": url, "large": null, "medium": null }));
            json!({
                "id": id,
                "type": "anime",
                "attributes": {
                    "canonicalTitle": title,
                    "posterImage": poster_image
                }
            })
        })
        .collect();
    json!({ "data": data })
}
