//! Access roads: connectors from a main road to a building lot.

use cg_core::Rect;

/// Rectangle spanning the gap between `main_road` and `lot`.
///
/// For a horizontal main road (`width > height`) the connector is
/// `road_width` wide, centred on the lot in x, and runs from the road's near
/// edge to the lot's near edge.  For a vertical main road it is `road_width`
/// long, centred on the lot in y, and runs horizontally.  `None` when the
/// gap is zero or negative, i.e. the lot touches or overlaps the road.
pub fn access_road_rect(road_width: f32, lot: Rect, main_road: Rect) -> Option<Rect> {
    let rect = if main_road.width > main_road.height {
        let x = lot.x + lot.width / 2.0 - road_width / 2.0;
        if lot.y > main_road.center().y {
            Rect::new(x, main_road.bottom(), road_width, lot.y - main_road.bottom())
        } else {
            Rect::new(x, lot.bottom(), road_width, main_road.y - lot.bottom())
        }
    } else {
        let y = lot.y + lot.height / 2.0 - road_width / 2.0;
        if lot.x > main_road.center().x {
            Rect::new(main_road.right(), y, lot.x - main_road.right(), road_width)
        } else {
            Rect::new(lot.right(), y, main_road.x - lot.right(), road_width)
        }
    };
    rect.has_area().then_some(rect)
}
