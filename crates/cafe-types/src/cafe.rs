//! Cafe record types

use serde::{Deserialize, Serialize};

/// A stored cafe.
///
/// Field order is the wire order: every JSON representation of a cafe lists
/// its keys exactly as declared here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cafe {
    pub id: i64,
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: String,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    pub coffee_price: String,
}

/// A cafe that has not been stored yet (no id assigned)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCafe {
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: String,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    pub coffee_price: String,
}

impl NewCafe {
    /// Attach the id assigned by the store
    pub fn with_id(self, id: i64) -> Cafe {
        Cafe {
            id,
            name: self.name,
            map_url: self.map_url,
            img_url: self.img_url,
            location: self.location,
            seats: self.seats,
            has_toilet: self.has_toilet,
            has_wifi: self.has_wifi,
            has_sockets: self.has_sockets,
            can_take_calls: self.can_take_calls,
            coffee_price: self.coffee_price,
        }
    }
}

impl Cafe {
    /// Amenity labels for the flags that are set, in display order
    pub fn amenities(&self) -> Vec<&'static str> {
        [
            (self.has_toilet, "Toilet"),
            (self.has_wifi, "Wi-Fi"),
            (self.has_sockets, "Sockets"),
            (self.can_take_calls, "Calls OK"),
        ]
        .into_iter()
        .filter_map(|(set, label)| set.then_some(label))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Cafe {
        NewCafe {
            name: "Science Gallery London".to_string(),
            map_url: "https://g.page/scigallerylon".to_string(),
            img_url: "https://example.com/sgl.jpg".to_string(),
            location: "London Bridge".to_string(),
            seats: "50+".to_string(),
            has_toilet: true,
            has_wifi: false,
            has_sockets: true,
            can_take_calls: true,
            coffee_price: "£2.40".to_string(),
        }
        .with_id(7)
    }

    #[test]
    fn test_serialized_key_order() {
        let json = serde_json::to_string(&sample()).unwrap();
        let keys = [
            "\"id\"",
            "\"name\"",
            "\"map_url\"",
            "\"img_url\"",
            "\"location\"",
            "\"seats\"",
            "\"has_toilet\"",
            "\"has_wifi\"",
            "\"has_sockets\"",
            "\"can_take_calls\"",
            "\"coffee_price\"",
        ];

        let positions: Vec<usize> = keys.iter().map(|k| json.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{}", json);
    }

    #[test]
    fn test_amenities() {
        assert_eq!(sample().amenities(), vec!["Toilet", "Sockets", "Calls OK"]);
    }
}
