//! Read-only view of a room and the characters and objects in it.
//!
//! The host game fills these in from its own world structures. Only what the
//! context builder and base selector need is carried.

use serde::{Deserialize, Serialize};
use wildweave_types::{Coord, RoomVnum, SectorType, Sky};

/// An object that may emit light.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemView {
    /// Short description.
    pub name: String,
    /// Light value for light-type objects, `None` for everything else.
    #[serde(default)]
    pub light: Option<i32>,
}

impl ItemView {
    /// A lit light source.
    pub fn light(name: impl Into<String>, amount: i32) -> Self {
        Self {
            name: name.into(),
            light: Some(amount),
        }
    }

    /// Light this item adds; unlit or non-light items add nothing.
    pub fn emitted_light(&self) -> i32 {
        self.light.filter(|amount| *amount > 0).unwrap_or(0)
    }
}

/// A character present in a room.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterView {
    /// Display name.
    pub name: String,
    /// Worn equipment.
    #[serde(default)]
    pub equipment: Vec<ItemView>,
    /// Carried inventory.
    #[serde(default)]
    pub carrying: Vec<ItemView>,
}

impl CharacterView {
    /// A character with no items.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Light from worn and carried items.
    pub fn carried_light(&self) -> i32 {
        self.equipment
            .iter()
            .chain(&self.carrying)
            .fold(0_i32, |total, item| total.saturating_add(item.emitted_light()))
    }
}

/// A room as seen by the description pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomView {
    /// Room number.
    pub vnum: RoomVnum,
    /// Owning zone number.
    #[serde(default)]
    pub zone: i32,
    /// Whether the room is coordinate-addressed wilderness.
    #[serde(default)]
    pub is_wilderness: bool,
    /// Wilderness coordinates, if assigned.
    #[serde(default)]
    pub coords: Option<Coord>,
    /// Terrain classification.
    pub sector: SectorType,
    /// Whether the sky is visible.
    #[serde(default = "default_outdoors")]
    pub outdoors: bool,
    /// Light level built into the room.
    #[serde(default)]
    pub base_light: i32,
    /// Characters present.
    #[serde(default)]
    pub occupants: Vec<CharacterView>,
    /// Objects lying in the room.
    #[serde(default)]
    pub contents: Vec<ItemView>,
    /// Global sky condition, used outside the wilderness.
    #[serde(default = "default_sky")]
    pub sky: Sky,
}

const fn default_outdoors() -> bool {
    true
}

const fn default_sky() -> Sky {
    Sky::Cloudless
}

impl RoomView {
    /// An empty outdoor wilderness room at a coordinate.
    pub const fn wilderness(vnum: RoomVnum, zone: i32, at: Coord, sector: SectorType) -> Self {
        Self {
            vnum,
            zone,
            is_wilderness: true,
            coords: Some(at),
            sector,
            outdoors: true,
            base_light: 0,
            occupants: Vec::new(),
            contents: Vec::new(),
            sky: Sky::Cloudless,
        }
    }

    /// A hand-built room outside the wilderness.
    pub const fn static_room(vnum: RoomVnum, zone: i32, sector: SectorType, sky: Sky) -> Self {
        Self {
            vnum,
            zone,
            is_wilderness: false,
            coords: None,
            sector,
            outdoors: !matches!(sector, SectorType::Inside),
            base_light: 0,
            occupants: Vec::new(),
            contents: Vec::new(),
            sky,
        }
    }

    /// Coordinates, if this is a wilderness room that has them.
    pub const fn wilderness_coords(&self) -> Option<Coord> {
        if self.is_wilderness { self.coords } else { None }
    }

    /// Light from every light source in the room, excluding the room's own.
    pub fn item_light(&self) -> i32 {
        let carried = self
            .occupants
            .iter()
            .fold(0_i32, |total, ch| total.saturating_add(ch.carried_light()));
        self.contents
            .iter()
            .fold(carried, |total, item| total.saturating_add(item.emitted_light()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_lit_light_items_count() {
        let mut hero = CharacterView::named("Aelis");
        hero.equipment.push(ItemView::light("a brass lantern", 30));
        hero.carrying.push(ItemView::light("a spent torch", 0));
        hero.carrying.push(ItemView {
            name: "a loaf of bread".to_owned(),
            light: None,
        });
        let mut room = RoomView::wilderness(RoomVnum::new(1_000_200), 10, Coord::new(0, 0), SectorType::Field);
        room.occupants.push(hero);
        room.contents.push(ItemView::light("a campfire", 20));
        assert_eq!(room.item_light(), 50);
    }

    #[test]
    fn static_rooms_have_no_coords() {
        let mut room = RoomView::static_room(RoomVnum::new(3001), 30, SectorType::City, Sky::Raining);
        room.coords = Some(Coord::new(5, 5));
        assert_eq!(room.wilderness_coords(), None);
        assert!(room.outdoors);
        let inside = RoomView::static_room(RoomVnum::new(3002), 30, SectorType::Inside, Sky::Raining);
        assert!(!inside.outdoors);
    }
}
