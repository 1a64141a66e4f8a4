use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use geo_types::Point;
use gpx::{Gpx, GpxVersion, Route as GpxRoute, Waypoint as GpxWaypoint};

use crate::error::RouteError;
use crate::models::{Route, Waypoint};

/// GPX 1.1 document holding `route` as a single `<rte>`, base64 encoded.
pub fn encode_route_as_gpx(route: &Route) -> Result<String, RouteError> {
    let mut gpx = Gpx {
        version: GpxVersion::Gpx11,
        creator: Some("maritime_backend".into()),
        ..Default::default()
    };
    let gpx_route = GpxRoute {
        name: Some(route.name.clone()),
        description: describe(route),
        points: route.waypoints.iter().map(to_gpx_waypoint).collect(),
        ..Default::default()
    };
    gpx.routes.push(gpx_route);

    let mut buffer = Vec::new();
    gpx::write(&gpx, &mut buffer)?;
    Ok(BASE64.encode(buffer))
}

fn describe(route: &Route) -> Option<String> {
    match (route.origin.is_empty(), route.destination.is_empty()) {
        (true, true) => None,
        _ => Some(format!("{} - {}", route.origin, route.destination)),
    }
}

fn to_gpx_waypoint(waypoint: &Waypoint) -> GpxWaypoint {
    let mut point = GpxWaypoint::new(Point::new(waypoint.lon, waypoint.lat));
    point.name = Some(waypoint.label());
    point
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route() -> Route {
        Route {
            id: "bgo-trd".into(),
            index: 0,
            name: "Bergen - Trondheim".into(),
            origin: "Bergen".into(),
            destination: "Trondheim".into(),
            waypoints: vec![
                Waypoint {
                    lat: 60.39,
                    lon: 5.32,
                    name: Some("Bergen".into()),
                    sequence: 0,
                },
                Waypoint {
                    lat: 63.43,
                    lon: 10.39,
                    name: None,
                    sequence: 1,
                },
            ],
            total_distance_nm: 231.9,
        }
    }

    #[test]
    fn gpx_contains_named_route_points() {
        let encoded = encode_route_as_gpx(&route()).expect("gpx");
        let xml = String::from_utf8(BASE64.decode(encoded).expect("base64")).expect("utf8");

        assert!(xml.contains("<rte>"));
        assert!(xml.contains("Bergen - Trondheim"));
        assert!(xml.contains("<name>WP2</name>"));
        assert!(xml.contains("lat=\"63.43\""));
    }

    #[test]
    fn gpx_reads_back() {
        let encoded = encode_route_as_gpx(&route()).expect("gpx");
        let bytes = BASE64.decode(encoded).expect("base64");
        let parsed = gpx::read(bytes.as_slice()).expect("valid gpx");

        assert_eq!(parsed.routes.len(), 1);
        let points = &parsed.routes[0].points;
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].point().y(), 60.39);
        assert_eq!(points[0].name.as_deref(), Some("Bergen"));
    }
}
