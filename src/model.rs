//! Static origin data shown on the map.
//! Marker positions are percentages of the content layer, so they follow the
//! pan/zoom transform without being recomputed.

use crate::state::Viewport;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MarkerId(pub &'static str);

impl MarkerId {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MarkerLocation {
    pub id: MarkerId,
    pub name: &'static str,
    pub description: &'static str,
    /// Horizontal position, percent of the content width.
    pub x_percent: f64,
    /// Vertical position, percent of the content height.
    pub y_percent: f64,
    pub image: &'static str,
    /// Growing altitude in metres, as a range.
    pub altitude: &'static str,
    pub varieties: &'static [&'static str],
    pub process: &'static str,
    pub flavors: &'static [&'static str],
}

impl MarkerLocation {
    /// Position inside the untransformed content layer, in pixels.
    pub fn content_position(&self, content_w: f64, content_h: f64) -> (f64, f64) {
        (
            content_w * self.x_percent / 100.0,
            content_h * self.y_percent / 100.0,
        )
    }

    /// Position relative to the container after the viewport transform.
    /// The content layer scales around its centre.
    pub fn project(&self, viewport: &Viewport) -> (f64, f64) {
        let (cw, ch) = viewport.content_size();
        let (lx, ly) = self.content_position(cw, ch);
        let (ox, oy) = (cw * 0.5, ch * 0.5);
        (
            viewport.offset_x + ox + (lx - ox) * viewport.scale,
            viewport.offset_y + oy + (ly - oy) * viewport.scale,
        )
    }

    pub fn initial(&self) -> char {
        self.name.chars().next().unwrap_or('?')
    }

    /// Products listing filtered to this origin.
    pub fn beans_url(&self) -> String {
        format!("/beans?region={}", self.id.as_str())
    }
}

pub fn find_marker(id: MarkerId) -> Option<&'static MarkerLocation> {
    ORIGINS.iter().find(|m| m.id == id)
}

pub static ORIGINS: &[MarkerLocation] = &[
    MarkerLocation {
        id: MarkerId("ethiopian-yirgacheffe"),
        name: "Ethiopian Yirgacheffe",
        description: "Bright and floral with notes of citrus and jasmine",
        x_percent: 58.0,
        y_percent: 35.0,
        image: "/images/ethiopian-farm.jpg",
        altitude: "1800-2300",
        varieties: &["Gesha", "Ethiopian Heirloom"],
        process: "Washed",
        flavors: &["Red flowers", "Kiwi fruit", "Dark berries", "Melon", "Peach"],
    },
    MarkerLocation {
        id: MarkerId("colombian-highlands"),
        name: "Colombian Highlands",
        description: "Rich and balanced with hints of chocolate and nuts",
        x_percent: 28.0,
        y_percent: 53.0,
        image: "/images/colombian-farm.jpg",
        altitude: "1500-2000",
        varieties: &["Caturra", "Typica", "Bourbon"],
        process: "Washed",
        flavors: &["Chocolate", "Caramel", "Citrus", "Berry"],
    },
    MarkerLocation {
        id: MarkerId("brazilian-cerrado"),
        name: "Brazilian Cerrado",
        description: "Sweet with nutty notes and low acidity",
        x_percent: 35.0,
        y_percent: 60.0,
        image: "/images/brazilian-farm.jpg",
        altitude: "800-1300",
        varieties: &["Mundo Novo", "Bourbon", "Catuai"],
        process: "Natural",
        flavors: &["Nuts", "Chocolate", "Caramel", "Red Apple"],
    },
    MarkerLocation {
        id: MarkerId("kenyan-plateaus"),
        name: "Kenyan Plateaus",
        description: "Bold and wine-like with pronounced acidity",
        x_percent: 65.0,
        y_percent: 45.0,
        image: "/images/kenyan-farm.jpg",
        altitude: "1700-2200",
        varieties: &["SL28", "SL34", "Ruiru 11"],
        process: "Washed",
        flavors: &["Blackcurrant", "Tomato", "Blackberry", "Citrus"],
    },
    MarkerLocation {
        id: MarkerId("guatemalan-antigua"),
        name: "Guatemalan Antigua",
        description: "Complex with chocolate and spice notes",
        x_percent: 24.0,
        y_percent: 47.0,
        image: "/images/guatemalan-farm.jpg",
        altitude: "1500-1800",
        varieties: &["Bourbon", "Caturra", "Catuai"],
        process: "Washed",
        flavors: &["Chocolate", "Spice", "Red Apple", "Citrus"],
    },
    MarkerLocation {
        id: MarkerId("indonesian-islands"),
        name: "Indonesian Islands",
        description: "Tropical climate yielding earthy, full-bodied coffee with herbal notes",
        x_percent: 78.0,
        y_percent: 62.0,
        image: "/images/indonesian-farm.jpg",
        altitude: "1100-1600",
        varieties: &["Typica", "Catimor"],
        process: "Wet-hulled",
        flavors: &["Cedar", "Dark Chocolate", "Tobacco", "Herbal"],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapConfig;

    fn centre_marker() -> MarkerLocation {
        MarkerLocation {
            x_percent: 50.0,
            y_percent: 50.0,
            ..ORIGINS[0].clone()
        }
    }

    #[test]
    fn centre_marker_stays_at_content_centre() {
        let m = centre_marker();
        let mut vp = Viewport::new(MapConfig::default());
        vp.resize(800.0, 600.0).unwrap();
        for (dx, dy, dz) in [(0.0, 0.0, 0.0), (150.0, -80.0, 0.7), (-600.0, 400.0, -0.9)] {
            vp.apply_delta(dx, dy);
            vp.apply_zoom_delta(dz);
            assert_eq!(m.content_position(1600.0, 1200.0), (800.0, 600.0));
            let (sx, sy) = m.project(&vp);
            assert!((sx - (vp.offset_x + 800.0)).abs() < 1e-9);
            assert!((sy - (vp.offset_y + 600.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn off_centre_marker_scales_away_from_centre() {
        let m = &ORIGINS[0];
        let mut vp = Viewport::new(MapConfig::default());
        vp.resize(800.0, 600.0).unwrap();
        let (x1, _) = m.project(&vp);
        vp.apply_zoom_delta(1.0);
        let (x2, _) = m.project(&vp);
        // 58% sits right of centre, so zooming in pushes it further right
        assert!(x2 > x1);
    }

    #[test]
    fn origin_ids_are_unique_and_in_range() {
        for (i, a) in ORIGINS.iter().enumerate() {
            assert!((0.0..=100.0).contains(&a.x_percent));
            assert!((0.0..=100.0).contains(&a.y_percent));
            assert!(ORIGINS[i + 1..].iter().all(|b| b.id != a.id));
        }
    }

    #[test]
    fn beans_link_filters_by_region() {
        let m = find_marker(MarkerId("kenyan-plateaus")).unwrap();
        assert_eq!(m.beans_url(), "/beans?region=kenyan-plateaus");
        assert!(find_marker(MarkerId("nowhere")).is_none());
    }
}
