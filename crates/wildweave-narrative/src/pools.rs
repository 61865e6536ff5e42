//! Curated opening-sentence pools per terrain family and abundance tier.
//!
//! Every pool holds at least twelve templates so consecutive visits rarely
//! repeat. Forest templates carry a `{tree}` slot filled with a species
//! noun. Some daytime templates mention daylight words and are rejected at
//! night; every family has a night fallback that never does.

use wildweave_types::{AbundanceTier, SectorType};

use crate::template::Template;

/// Words that only read correctly while the sun is up.
pub const DAYLIGHT_WORDS: [&str; 3] = ["sunlight", "golden", "bright"];

/// Terrain family a sector's opening sentence is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerrainFamily {
    /// Woodland.
    Forest,
    /// Rolling hills; also the fallback family.
    Hills,
    /// Fields and open plains.
    Plains,
    /// Rivers, lakes and open sea.
    Water,
    /// Beneath the surface.
    Underwater,
    /// Shoreline.
    Beach,
    /// Arid sand and stone.
    Desert,
    /// Wetland.
    Marsh,
    /// Mountains and high peaks.
    Mountain,
    /// Roads of any orientation.
    Road,
}

impl TerrainFamily {
    /// Every family in declaration order.
    pub const ALL: [Self; 10] = [
        Self::Forest,
        Self::Hills,
        Self::Plains,
        Self::Water,
        Self::Underwater,
        Self::Beach,
        Self::Desert,
        Self::Marsh,
        Self::Mountain,
        Self::Road,
    ];

    /// Family for a sector. Sectors without a wilderness pool use hills.
    pub const fn from_sector(sector: SectorType) -> Self {
        match sector {
            SectorType::Forest => Self::Forest,
            SectorType::Field | SectorType::Planes => Self::Plains,
            SectorType::WaterSwim | SectorType::WaterNoSwim | SectorType::Ocean => Self::Water,
            SectorType::Underwater => Self::Underwater,
            SectorType::Beach => Self::Beach,
            SectorType::Desert => Self::Desert,
            SectorType::Marshland => Self::Marsh,
            SectorType::Mountain | SectorType::HighMountain => Self::Mountain,
            SectorType::RoadNorthSouth
            | SectorType::RoadEastWest
            | SectorType::RoadIntersection => Self::Road,
            SectorType::Hills | SectorType::Inside | SectorType::City | SectorType::Flying => {
                Self::Hills
            }
        }
    }

    /// Whether the family describes water itself.
    pub const fn is_aquatic(self) -> bool {
        matches!(self, Self::Water | Self::Underwater)
    }

    /// Lower-case name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Forest => "forest",
            Self::Hills => "hills",
            Self::Plains => "plains",
            Self::Water => "water",
            Self::Underwater => "underwater",
            Self::Beach => "beach",
            Self::Desert => "desert",
            Self::Marsh => "marsh",
            Self::Mountain => "mountain",
            Self::Road => "road",
        }
    }
}

/// The template pool for a family and tier.
pub const fn pool(family: TerrainFamily, tier: AbundanceTier) -> &'static [Template] {
    match (family, tier) {
        (TerrainFamily::Forest, AbundanceTier::Abundant) => &FOREST_ABUNDANT,
        (TerrainFamily::Forest, AbundanceTier::Moderate) => &FOREST_MODERATE,
        (TerrainFamily::Forest, AbundanceTier::Sparse) => &FOREST_SPARSE,
        (TerrainFamily::Hills, AbundanceTier::Abundant) => &HILLS_ABUNDANT,
        (TerrainFamily::Hills, AbundanceTier::Moderate) => &HILLS_MODERATE,
        (TerrainFamily::Hills, AbundanceTier::Sparse) => &HILLS_SPARSE,
        (TerrainFamily::Plains, AbundanceTier::Abundant) => &PLAINS_ABUNDANT,
        (TerrainFamily::Plains, AbundanceTier::Moderate) => &PLAINS_MODERATE,
        (TerrainFamily::Plains, AbundanceTier::Sparse) => &PLAINS_SPARSE,
        (TerrainFamily::Water, AbundanceTier::Abundant) => &WATER_ABUNDANT,
        (TerrainFamily::Water, AbundanceTier::Moderate) => &WATER_MODERATE,
        (TerrainFamily::Water, AbundanceTier::Sparse) => &WATER_SPARSE,
        (TerrainFamily::Underwater, AbundanceTier::Abundant) => &UNDERWATER_ABUNDANT,
        (TerrainFamily::Underwater, AbundanceTier::Moderate) => &UNDERWATER_MODERATE,
        (TerrainFamily::Underwater, AbundanceTier::Sparse) => &UNDERWATER_SPARSE,
        (TerrainFamily::Beach, AbundanceTier::Abundant) => &BEACH_ABUNDANT,
        (TerrainFamily::Beach, AbundanceTier::Moderate) => &BEACH_MODERATE,
        (TerrainFamily::Beach, AbundanceTier::Sparse) => &BEACH_SPARSE,
        (TerrainFamily::Desert, AbundanceTier::Abundant) => &DESERT_ABUNDANT,
        (TerrainFamily::Desert, AbundanceTier::Moderate) => &DESERT_MODERATE,
        (TerrainFamily::Desert, AbundanceTier::Sparse) => &DESERT_SPARSE,
        (TerrainFamily::Marsh, AbundanceTier::Abundant) => &MARSH_ABUNDANT,
        (TerrainFamily::Marsh, AbundanceTier::Moderate) => &MARSH_MODERATE,
        (TerrainFamily::Marsh, AbundanceTier::Sparse) => &MARSH_SPARSE,
        (TerrainFamily::Mountain, AbundanceTier::Abundant) => &MOUNTAIN_ABUNDANT,
        (TerrainFamily::Mountain, AbundanceTier::Moderate) => &MOUNTAIN_MODERATE,
        (TerrainFamily::Mountain, AbundanceTier::Sparse) => &MOUNTAIN_SPARSE,
        (TerrainFamily::Road, AbundanceTier::Abundant) => &ROAD_ABUNDANT,
        (TerrainFamily::Road, AbundanceTier::Moderate) => &ROAD_MODERATE,
        (TerrainFamily::Road, AbundanceTier::Sparse) => &ROAD_SPARSE,
    }
}

/// Opening used when no pool template is acceptable at night.
pub const fn night_fallback(family: TerrainFamily) -> Template {
    match family {
        TerrainFamily::Forest => {
            Template::new("Dark {tree} trunks rise on every side, their shapes half-lost in shadow")
        }
        TerrainFamily::Hills => Template::new("Dim hills roll away into the darkness"),
        TerrainFamily::Plains => Template::new("Open land stretches away into the darkness"),
        TerrainFamily::Water => Template::new("Dark water stretches out, its surface barely visible"),
        TerrainFamily::Underwater => Template::new("Dim water closes in on every side"),
        TerrainFamily::Beach => Template::new("A shadowed shoreline runs along the dark water"),
        TerrainFamily::Desert => Template::new("Pale dunes stretch away into the darkness"),
        TerrainFamily::Marsh => Template::new("Still pools glint faintly across the dark marsh"),
        TerrainFamily::Mountain => Template::new("Dark mountain slopes rise against the night sky"),
        TerrainFamily::Road => Template::new("The road stretches ahead into the darkness"),
    }
}

// ---------------------------------------------------------------------------
// Forest
// ---------------------------------------------------------------------------

const FOREST_ABUNDANT: [Template; 13] = [
    Template::new("Ancient {tree} trees tower overhead, their massive trunks rising from rich, dark earth"),
    Template::new("Dense stands of {tree} crowd together here, trunks draped in moss and creeping vines"),
    Template::new("Towering {tree} trees form a living cathedral, their branches woven into a dense green roof"),
    Template::new("Sunlight struggles through the heavy {tree} canopy, dappling a forest floor thick with ferns"),
    Template::new("A thriving {tree} forest spreads in every direction, undergrowth lush and tangled between the trunks"),
    Template::new("Massive {tree} trunks rise from a carpet of moss and fallen leaves"),
    Template::new("The {tree} woods grow thick and wild here, branches interlacing far above a shadowed understory"),
    Template::new("Golden shafts of light pierce the crowded {tree} canopy, catching drifting motes of pollen"),
    Template::new("Old-growth {tree} trees stand shoulder to shoulder, their roots knotted across the dark soil"),
    Template::new("A verdant tangle of {tree} saplings and elder trees fills every gap in the deep forest"),
    Template::new("Broad {tree} boughs spread overhead in layered tiers, sheltering a world of fern and bramble"),
    Template::new("The forest is dense with {tree}, a green wall of leaf and bark broken only by narrow game trails"),
    Template::new("Bright green foliage crowds the {tree} branches so thickly that the sky is barely glimpsed"),
];

const FOREST_MODERATE: [Template; 12] = [
    Template::new("Mature {tree} trees create a pleasant woodland grove"),
    Template::new("Scattered stands of {tree} rise above a modest undergrowth of shrubs and grasses"),
    Template::new("Well-spaced {tree} trees form a comfortable woodland, light reaching the floor in patches"),
    Template::new("The {tree} forest thins here into a patchwork of groves and small clearings"),
    Template::new("Sturdy {tree} trees rise from soil enriched by countless seasons of fallen leaves"),
    Template::new("A quiet {tree} wood spreads across the land, trunks rising from a floor of leaf litter"),
    Template::new("Sunlight filters through a loose {tree} canopy onto scattered ferns and young saplings"),
    Template::new("A modest growth of {tree} and underbrush lines a winding path through the trees"),
    Template::new("Groves of {tree} alternate with grassy openings where the forest pauses"),
    Template::new("The woodland here holds a steady mix of {tree} trees and hardy shrubs"),
    Template::new("Straight-trunked {tree} trees stand in loose ranks, their branches casting shifting shade"),
    Template::new("A {tree} forest covers the ground, neither crowded nor sparse"),
];

const FOREST_SPARSE: [Template; 12] = [
    Template::new("Scattered {tree} trees dot the rolling landscape"),
    Template::new("Sparse {tree} trees stand isolated among patches of exposed earth"),
    Template::new("The forest thins to scattered {tree} trees with wide gaps between them"),
    Template::new("Weathered {tree} stumps and young saplings mark this quiet stretch of land"),
    Template::new("Only a handful of stunted {tree} trees remain here, clinging to the poor ground"),
    Template::new("Broken stumps and lone {tree} trees mark what was once a denser wood"),
    Template::new("A thin scattering of {tree} saplings struggles among rocks and dry grass"),
    Template::new("Gaunt {tree} trees lean at odd angles, their roots exposed by eroded soil"),
    Template::new("The remnants of a {tree} forest straggle across the land in ragged clumps"),
    Template::new("Bright open sky shows through the sparse crowns of a few {tree} trees"),
    Template::new("Hardy {tree} trees grow in isolated groves across the terrain"),
    Template::new("Scrubby undergrowth and the occasional {tree} tree are all that cover the ground"),
];

// ---------------------------------------------------------------------------
// Hills
// ---------------------------------------------------------------------------

const HILLS_ABUNDANT: [Template; 12] = [
    Template::new("Rolling hills stretch into the distance, their slopes carpeted with lush vegetation"),
    Template::new("Verdant hillsides rise and fall across the landscape, rich with plant life"),
    Template::new("Lush hills roll toward the horizon, their slopes thick with tall grass and thickets"),
    Template::new("Gentle hills swell beneath a rich mantle of clover, heather and flowering herbs"),
    Template::new("Grassy knolls crowd together here, their slopes thick with vibrant growth"),
    Template::new("Fertile hills climb in soft terraces, each shelf lush with grass and bramble"),
    Template::new("Golden light washes over green hills dense with meadow flowers"),
    Template::new("The hill country is alive with growth, thickets crowning every rise"),
    Template::new("Deep green slopes fold into one another, sheltering hollows full of fern and flower"),
    Template::new("Rich hill pasture spreads across the rises, grass swaying knee-high in the wind"),
    Template::new("Flowering gorse and thick grasses cloak the rolling hills in colour"),
    Template::new("Bright wildflowers spill down the lush hillsides in sweeping drifts"),
];

const HILLS_MODERATE: [Template; 12] = [
    Template::new("Modest hills rise from the surrounding terrain, dotted with hardy shrubs"),
    Template::new("Gentle hillsides create natural contours in the surrounding countryside"),
    Template::new("The hills here wear a modest coat of grass broken by patches of bare stone"),
    Template::new("Low hills roll away in every direction, grass thinning on the higher crests"),
    Template::new("Grassy slopes climb toward rounded hilltops crowned with a few hardy shrubs"),
    Template::new("A series of modest hills undulates across the land, green in the hollows and pale on the ridges"),
    Template::new("Hillsides of mixed grass and heather give way to weathered stone near the summits"),
    Template::new("The terrain rises in easy hills with scattered thickets tucked into the folds"),
    Template::new("Rounded hills covered in tufted grass rise gently from the surrounding land"),
    Template::new("A patchwork of grass and scrub covers the rolling hills"),
    Template::new("Sunlight plays across moderate hills of grass and scattered stone"),
    Template::new("Windswept hills carry a fair cover of grass, bending under each passing breeze"),
];

const HILLS_SPARSE: [Template; 12] = [
    Template::new("Barren hills stretch across the landscape, their slopes scoured by wind and weather"),
    Template::new("Rocky hillsides rise starkly from the surrounding terrain"),
    Template::new("Bare hillsides of loose stone and dust roll away under an open sky"),
    Template::new("Stony hills rise in weary folds, tufts of brittle grass scattered between the rocks"),
    Template::new("Eroded hills show raw earth where vegetation has failed to take hold"),
    Template::new("Sparse scrub clings to the flanks of dry, rocky hills"),
    Template::new("Windswept hills create a dramatic but desolate landscape"),
    Template::new("Pale, thin grass struggles across a series of stony rises"),
    Template::new("Gravel-strewn slopes climb toward bald hilltops with little growing on them"),
    Template::new("A few hardy thistles are all that grow on these desolate hills"),
    Template::new("Cracked earth and scattered stones cover the low, lifeless hills"),
    Template::new("The hills here are worn and bare, their crests stripped by the wind"),
];

// ---------------------------------------------------------------------------
// Plains
// ---------------------------------------------------------------------------

const PLAINS_ABUNDANT: [Template; 12] = [
    Template::new("Vast expanses of rich grassland stretch to the horizon"),
    Template::new("Rolling plains extend in all directions, carpeted with thick grass"),
    Template::new("Fertile meadows create a sea of green beneath the open sky"),
    Template::new("A sea of green grass ripples across the open land, dotted with bright blossoms"),
    Template::new("Fertile fields spread wide, their deep soil bursting with wild grain and clover"),
    Template::new("Golden grasses wave across the open plains, heavy with seed"),
    Template::new("The open prairie teems with growth, tall stems crowding every step"),
    Template::new("Verdant meadows flow to the horizon in soft, unbroken swells"),
    Template::new("Wild grasses and flowering herbs blanket the plains in a thick, fragrant mat"),
    Template::new("Rich grassland spreads far and wide, broken only by clumps of flowering shrubs"),
    Template::new("Thick meadow grass stands tall across the plain, rustling with every breeze"),
    Template::new("An expanse of lush pasture reaches out beneath a wide sky"),
];

const PLAINS_MODERATE: [Template; 12] = [
    Template::new("Open grasslands stretch across the landscape"),
    Template::new("The plains show patches of grass and wildflowers"),
    Template::new("Rolling fields create gentle waves across the terrain"),
    Template::new("The plains here hold a fair growth of grass broken by patches of bare soil"),
    Template::new("Short grass and scattered wildflowers cover the wide, open ground"),
    Template::new("Grassland spreads toward the horizon, thinning in places to dusty earth"),
    Template::new("A broad plain of modest grasses stretches beneath an open sky"),
    Template::new("Patches of clover and tufted grass dot the flat, open fields"),
    Template::new("The open land carries an even cover of grass, neither lush nor barren"),
    Template::new("Sunlight falls across level fields of green and pale gold"),
    Template::new("Flat meadows stretch away with occasional shrubs breaking the view"),
    Template::new("Windswept grasses bend across the wide, gentle plains"),
];

const PLAINS_SPARSE: [Template; 12] = [
    Template::new("Sparse grassland stretches across the barren landscape"),
    Template::new("Patches of hardy grass struggle to survive in the dry soil"),
    Template::new("The plains show signs of drought and neglect"),
    Template::new("Dusty flatlands stretch away, dotted with hardy weeds"),
    Template::new("The plains lie parched and patchy, bare soil cracked between sparse clumps"),
    Template::new("A thin cover of yellowed grass struggles across the flat land"),
    Template::new("Windblown dust drifts across a plain with little growing on it"),
    Template::new("Stubble and scrub are all that cover these empty fields"),
    Template::new("Barren stretches of packed earth alternate with sparse tussocks of grass"),
    Template::new("Flat, open land spreads bleakly to the horizon, its grass worn thin"),
    Template::new("Scattered thistles and dry stalks rise from the hard, dusty ground"),
    Template::new("A lonely plain extends in all directions, nearly bare of growth"),
];

// ---------------------------------------------------------------------------
// Water
// ---------------------------------------------------------------------------

const WATER_ABUNDANT: [Template; 12] = [
    Template::new("The clear, deep waters teem with aquatic life"),
    Template::new("The water is rich with life, thick beds of weed swaying beneath the surface"),
    Template::new("Broad water spreads wide, its margins crowded with rushes and water plants"),
    Template::new("Lush aquatic growth fringes the open water, green fronds trailing in the current"),
    Template::new("Lily pads crowd the surface in wide green rafts between stands of tall reeds"),
    Template::new("Deep water moves slowly here, dense weed beds darkening its depths"),
    Template::new("Sunlight glitters on water crowded with floating plants and drifting blossoms"),
    Template::new("Reed beds and cattails rise thickly from the shallows around the open water"),
    Template::new("The water lies rich and green, alive with drifting plants and darting shapes"),
    Template::new("Currents curl around thick mats of water weed spreading beneath the surface"),
    Template::new("Flowering water plants ring the open channel in a broad green border"),
    Template::new("The surface ripples over a flourishing garden of submerged greenery"),
];

const WATER_MODERATE: [Template; 12] = [
    Template::new("The waters flow with gentle currents and moderate clarity"),
    Template::new("The water flows steadily, with scattered weed beds beneath the surface"),
    Template::new("Calm water spreads across the area, lily pads drifting near the edges"),
    Template::new("Gentle ripples cross the water, which holds a modest scattering of plant life"),
    Template::new("Clear water runs over a bed of pebbles and sparse green weed"),
    Template::new("Clumps of rushes break the surface here and there along the waterway"),
    Template::new("The water is open and clear, with floating plants gathered in sheltered spots"),
    Template::new("A steady current moves past thin stands of reeds"),
    Template::new("The water lies wide and calm, its plant life present but unremarkable"),
    Template::new("Small rafts of duckweed drift across otherwise open water"),
    Template::new("Sunlight dances on the moving water above a few swaying fronds"),
    Template::new("Reeds grow in loose clusters where the water shallows"),
];

const WATER_SPARSE: [Template; 12] = [
    Template::new("The murky waters show little sign of life"),
    Template::new("The water runs bare over stone and sand, little growing beneath the surface"),
    Template::new("Cold, clear water spreads wide with scarcely a reed in sight"),
    Template::new("The surface lies open and unbroken, the depths below pale and empty"),
    Template::new("Dark water moves quietly, its bed barren of weed"),
    Template::new("Wind-ruffled water stretches away without a single lily pad"),
    Template::new("The water is clear to the bottom, where only silt and pebbles lie"),
    Template::new("A few broken reeds float on otherwise empty water"),
    Template::new("Open water spreads in a flat, featureless sheet"),
    Template::new("The current runs swift and clean over a bare, rocky bed"),
    Template::new("Bright reflections skate across open water with little life beneath"),
    Template::new("Grey water stretches out, empty and still"),
];

// ---------------------------------------------------------------------------
// Underwater
// ---------------------------------------------------------------------------

const UNDERWATER_ABUNDANT: [Template; 12] = [
    Template::new("Dense kelp forests and coral formations create an underwater jungle"),
    Template::new("Thick beds of sea grass carpet the bottom, teeming with tiny darting fish"),
    Template::new("Swaying underwater meadows spread in every direction, rich with life"),
    Template::new("Towering strands of weed form a dim green forest beneath the water"),
    Template::new("The bottom is carpeted in lush growth, fronds waving in slow unison"),
    Template::new("Colorful growths cling to every rock, crowding the water with life"),
    Template::new("A tangle of kelp and weed forms shadowed corridors through the depths"),
    Template::new("Light filters down through a canopy of floating fronds above a rich seabed"),
    Template::new("Thick mats of green and brown growth cover the rocks in undulating layers"),
    Template::new("Schools of small fish weave through dense stands of swaying weed"),
    Template::new("The water is crowded with drifting plant life, a submerged jungle of green"),
    Template::new("Broad-leafed water plants rise from the silt in a thick, rippling meadow"),
];

const UNDERWATER_MODERATE: [Template; 12] = [
    Template::new("Scattered sea plants and coral provide habitat for marine life"),
    Template::new("Scattered kelp rises from the rocks, swaying in the slow current"),
    Template::new("The underwater landscape holds a fair growth of weed among the stones"),
    Template::new("Clumps of green growth dot the silt, separated by open sand"),
    Template::new("Modest stands of water plants bend with the current"),
    Template::new("The bottom is a mix of bare rock and swaying fronds"),
    Template::new("A few small fish flit between scattered tufts of weed"),
    Template::new("Weed-covered stones rise from a floor of pale sand"),
    Template::new("Thin ribbons of kelp drift upward from the rocks below"),
    Template::new("Patches of growth alternate with open stretches of rippled silt"),
    Template::new("Muted green light falls over a moderately overgrown seabed"),
    Template::new("Soft fronds cling to the rocks in loose, drifting clusters"),
];

const UNDERWATER_SPARSE: [Template; 12] = [
    Template::new("The barren seafloor stretches into the murky depths"),
    Template::new("The water is empty and dim, its floor barren of plant life"),
    Template::new("A few isolated strands of weed cling to scoured rocks"),
    Template::new("Silt drifts over a lifeless bottom, stirred by the slow current"),
    Template::new("Cold water surrounds a featureless expanse of sand"),
    Template::new("The rocky floor lies bare, scraped clean by the currents"),
    Template::new("Only thin films of algae color the stones below"),
    Template::new("Murky water hangs over an empty stretch of seabed"),
    Template::new("Pale sand ripples away into the gloom with nothing growing on it"),
    Template::new("A few broken fronds drift past over a barren bottom"),
    Template::new("The depths here are quiet and empty, little more than stone and silt"),
    Template::new("Dim water shrouds a bleak, sandy floor"),
];

// ---------------------------------------------------------------------------
// Beach
// ---------------------------------------------------------------------------

const BEACH_ABUNDANT: [Template; 12] = [
    Template::new("The sandy shore is lined with dune grasses and coastal vegetation"),
    Template::new("Lush sea oats and flowering vines cover the dunes above the tideline"),
    Template::new("The shore is rich with life, tide pools crowded with weed and shells"),
    Template::new("Green dune grass ripples above a broad strand of pale sand"),
    Template::new("Thick mats of beach vine spread across the sand toward the water"),
    Template::new("Golden sand meets the water beneath dunes crowned with tall grasses"),
    Template::new("Tangled wrack and weed line the high-water mark along a busy shore"),
    Template::new("Flowering shrubs and grasses crowd the back of the beach"),
    Template::new("Driftwood lies among dense dune plants along the curving shore"),
    Template::new("The beach is framed by thriving grasses that hiss softly in the sea breeze"),
    Template::new("Bright shells and glistening weed litter a broad, lively shore"),
    Template::new("Lush coastal scrub gives way to smooth sand and lapping waves"),
];

const BEACH_MODERATE: [Template; 12] = [
    Template::new("The beach shows patches of hardy coastal plants among the sand"),
    Template::new("The shore stretches out in a band of sand and pebbles"),
    Template::new("Low dunes with scattered grass rise above the tideline"),
    Template::new("Waves wash over a beach of mixed sand and shingle"),
    Template::new("Clumps of sea grass anchor the dunes along the shore"),
    Template::new("A line of seaweed marks the high-water mark on the sand"),
    Template::new("The beach is open and quiet, with a few hardy plants on the dunes"),
    Template::new("Smooth stones and sand share the shoreline in equal measure"),
    Template::new("Driftwood and scattered grass break up the stretch of beach"),
    Template::new("Sunlight glints off wet sand where the waves retreat"),
    Template::new("A modest strand of sand meets the water beneath low dunes"),
    Template::new("The shoreline runs on, sand giving way to pebbles near the water"),
];

const BEACH_SPARSE: [Template; 12] = [
    Template::new("The bare sandy shore meets the water with minimal vegetation"),
    Template::new("Windswept sand piles against bare dunes along the water"),
    Template::new("The shore is empty, its sand smooth and untouched"),
    Template::new("Shingle and grit crunch along a bleak stretch of coast"),
    Template::new("Bare dunes rise above a featureless strip of sand"),
    Template::new("Scoured sand runs down to the water with nothing growing on it"),
    Template::new("A few bleached shells lie scattered across the empty beach"),
    Template::new("Coarse sand and wave-worn stones line the lonely shore"),
    Template::new("The beach is narrow and bare, hemmed in by cold water"),
    Template::new("Drifting sand buries the last traces of dune grass"),
    Template::new("Grey sand stretches away under a wide, empty sky"),
    Template::new("The tideline is marked only by a thin band of dried foam"),
];

// ---------------------------------------------------------------------------
// Desert
// ---------------------------------------------------------------------------

const DESERT_ABUNDANT: [Template; 12] = [
    Template::new("The desert landscape supports hardy cacti and drought-resistant shrubs"),
    Template::new("The desert blooms unexpectedly, wildflowers scattered between thorny shrubs"),
    Template::new("Clusters of tall cacti stand among tufts of tough desert grass"),
    Template::new("Sturdy scrub and succulents crowd the sandy hollows"),
    Template::new("A surprisingly green stretch of desert spreads out among the dunes"),
    Template::new("Flowering succulents and mesquite thickets break up the sandy plain"),
    Template::new("Golden sand gives way to pockets of greenery where hidden water lies"),
    Template::new("Thorny shrubs and bristling cacti cover the ground in a living mosaic"),
    Template::new("Desert grasses grow thick in the lee of the dunes"),
    Template::new("Blossoming cacti add color to a desert thick with hardy growth"),
    Template::new("Palms and scrub cluster around damp hollows in the sand"),
    Template::new("The desert here teems with resilient life, each plant guarding its patch of shade"),
];

const DESERT_MODERATE: [Template; 12] = [
    Template::new("Scattered desert plants dot the arid landscape"),
    Template::new("The desert stretches out in a mix of sand and sparse shrubs"),
    Template::new("Dry scrub clings to the low dunes of the desert"),
    Template::new("Wind-carved sand spreads between clumps of hardy brush"),
    Template::new("Scattered cacti rise from cracked, sandy ground"),
    Template::new("The desert floor holds a thin scattering of tough plants"),
    Template::new("Dunes and stony flats alternate across the dry landscape"),
    Template::new("A few thorny bushes mark the way across the sand"),
    Template::new("Bright sand glares between scattered patches of scrub"),
    Template::new("Low desert brush grows in loose clumps across the dunes"),
    Template::new("Dry washes cut through the sand, lined with straggling shrubs"),
    Template::new("The desert lies quiet, its sparse plants spaced far apart"),
];

const DESERT_SPARSE: [Template; 12] = [
    Template::new("The barren desert shows only wind-carved sand and stone"),
    Template::new("The desert lies parched and empty, nothing growing among the dunes"),
    Template::new("Sun-baked sand and cracked earth spread in every direction"),
    Template::new("Rippled dunes march away with no sign of life"),
    Template::new("A bleak expanse of sand and stone shimmers into the distance"),
    Template::new("Wind hisses across bare dunes, shifting the sand in slow waves"),
    Template::new("The cracked desert floor is bare save for a few dead stalks"),
    Template::new("Dry, empty sand stretches on without relief"),
    Template::new("Bleached stones lie half-buried in the lifeless sand"),
    Template::new("The dunes rise and fall in a silent, barren sea"),
    Template::new("Hard-packed sand and gravel offer nothing to the eye"),
    Template::new("A desolate wasteland of sand extends beneath an empty sky"),
];

// ---------------------------------------------------------------------------
// Marsh
// ---------------------------------------------------------------------------

const MARSH_ABUNDANT: [Template; 12] = [
    Template::new("The wetland thrives with cattails, sedges, and marsh grasses"),
    Template::new("The marsh is alive with growth, reeds crowding every pool"),
    Template::new("Lush wetland spreads out in a tangle of rushes, sedge and flowering weeds"),
    Template::new("Dense reed beds hide dark channels of still water"),
    Template::new("Mossy hummocks and tall grasses crowd the soggy earth"),
    Template::new("Flowering water plants blanket the shallow pools of the marsh"),
    Template::new("A verdant swamp stretches out, thick with vines and hanging moss"),
    Template::new("Rushes stand shoulder-high across the rich, wet ground"),
    Template::new("The wetland teems with green life, every pool ringed with growth"),
    Template::new("Spongy ground gives way beneath a thick carpet of moss and sedge"),
    Template::new("Bright green duckweed coats the still water between dense reeds"),
    Template::new("Tall marsh plants sway above a maze of hidden channels"),
];

const MARSH_MODERATE: [Template; 12] = [
    Template::new("The boggy terrain supports patches of wetland vegetation"),
    Template::new("Reeds and sedge grow in patches across the damp ground"),
    Template::new("Soggy earth squelches between clumps of marsh grass"),
    Template::new("Still pools reflect the sky between scattered rushes"),
    Template::new("The wetland holds a fair growth of reeds and moss"),
    Template::new("Muddy ground alternates with patches of tall grass"),
    Template::new("Scattered cattails rise from the murky water"),
    Template::new("A low, damp landscape stretches out, tufted with sedge"),
    Template::new("Channels of slow water wind between grassy hummocks"),
    Template::new("The marsh is quiet, its reeds growing in loose stands"),
    Template::new("Moss and rushes cover the waterlogged ground in uneven patches"),
    Template::new("Shallow water glints between clumps of marsh growth"),
];

const MARSH_SPARSE: [Template; 12] = [
    Template::new("The sparse marshland shows muddy patches with minimal plant life"),
    Template::new("Mud flats spread wide with only a few withered reeds"),
    Template::new("The wetland lies bleak, its grasses thin and brown"),
    Template::new("Dark water pools across the barren, sodden ground"),
    Template::new("Rotting stems poke from the sluggish water of the marsh"),
    Template::new("The marsh is mostly mud, cracked where the water has retreated"),
    Template::new("A few stunted reeds struggle in the brackish pools"),
    Template::new("Grey mud and still water stretch out in a lifeless expanse"),
    Template::new("The soggy ground holds little but mud and scum-covered water"),
    Template::new("Broken reeds lean over stagnant pools"),
    Template::new("A sour smell rises from the bare, waterlogged earth"),
    Template::new("The fen lies empty and still, its water dull and lifeless"),
];

// ---------------------------------------------------------------------------
// Mountain
// ---------------------------------------------------------------------------

const MOUNTAIN_ABUNDANT: [Template; 12] = [
    Template::new("The mountain slopes are covered with alpine forests and hardy vegetation"),
    Template::new("Majestic peaks tower above slopes rich with trees and flowering heath"),
    Template::new("Steep mountainsides are clothed in dense scrub and clinging forest"),
    Template::new("Alpine meadows bloom between rocky outcrops on the mountain's flank"),
    Template::new("Mountain slopes rise in green terraces thick with hardy growth"),
    Template::new("Stunted trees and lush mountain grasses cover the lower slopes"),
    Template::new("Waterfalls tumble down mountainsides thick with moss and fern"),
    Template::new("Wildflowers crowd the high pastures between jagged rocks"),
    Template::new("The mountain's flanks are green with stubborn forest and brush"),
    Template::new("Golden light strikes peaks rising above richly wooded slopes"),
    Template::new("Thick mats of heather and moss climb toward the rocky heights"),
    Template::new("Lush alpine growth fills every sheltered hollow on the slopes"),
];

const MOUNTAIN_MODERATE: [Template; 12] = [
    Template::new("The rocky peaks show patches of mountain vegetation in sheltered areas"),
    Template::new("Jagged peaks loom above slopes of stone and scattered pines"),
    Template::new("The mountainside climbs in broken ledges, sparse grass between the rocks"),
    Template::new("Weathered cliffs tower above scree slopes and scattered trees"),
    Template::new("Steep trails wind between boulders and patches of alpine grass"),
    Template::new("The mountain rises in grey stone, softened by clumps of heather"),
    Template::new("Wind-bent pines cling to the rocky slopes"),
    Template::new("Granite outcrops break through a thin cover of mountain scrub"),
    Template::new("The slopes climb relentlessly, mixing bare rock with hardy growth"),
    Template::new("Bright snowfields gleam above slopes of stone and grass"),
    Template::new("Rugged ridges rise in tiers, each with its scattering of shrubs"),
    Template::new("Rock and scrub share the mountainside in roughly equal measure"),
];

const MOUNTAIN_SPARSE: [Template; 12] = [
    Template::new("The stark mountain terrain reveals mostly bare rock and scree"),
    Template::new("Bare rock slopes climb steeply with nothing growing on them"),
    Template::new("Jagged cliffs of naked stone tower overhead"),
    Template::new("Loose scree and shattered rock cover the desolate slopes"),
    Template::new("The mountain rises stark and lifeless, scoured by the wind"),
    Template::new("Only lichen clings to the grey rock of the heights"),
    Template::new("Frost-cracked stone lies in heaps across the barren slope"),
    Template::new("Sheer rock faces rise above a wasteland of boulders"),
    Template::new("The peaks stand bare and forbidding, their flanks empty of life"),
    Template::new("Icy winds sweep across bare granite ridges"),
    Template::new("Broken stone and gravel stretch upward toward the bare summit"),
    Template::new("A bleak mountainscape of rock and shadow surrounds the trail"),
];

// ---------------------------------------------------------------------------
// Road
// ---------------------------------------------------------------------------

const ROAD_ABUNDANT: [Template; 12] = [
    Template::new("A well-traveled road winds through lush countryside, verges thick with grass and flowers"),
    Template::new("The road runs between hedgerows heavy with leaves and blossom"),
    Template::new("The packed earth of the road cuts through rich green fields on either side"),
    Template::new("Tall grasses and wildflowers crowd the edges of the winding road"),
    Template::new("The road passes beneath overhanging branches thick with foliage"),
    Template::new("A broad highway stretches ahead, flanked by lush meadows"),
    Template::new("Wheel ruts mark the road as it curves through fertile land"),
    Template::new("Flowering shrubs line the roadside in a riot of color"),
    Template::new("The road follows the land's contours between thick green verges"),
    Template::new("Golden fields flank the road on both sides, heavy with growth"),
    Template::new("Grass grows thick along the road's shoulders, brushing the wheel ruts"),
    Template::new("A cobbled track runs through a landscape alive with greenery"),
];

const ROAD_MODERATE: [Template; 12] = [
    Template::new("A dirt road stretches onward, its verges lined with short grass"),
    Template::new("The road winds across open land dotted with shrubs"),
    Template::new("Wagon ruts crease the surface of a well-used track"),
    Template::new("The road runs straight between grassy banks"),
    Template::new("A packed earth road cuts through modest fields and scattered trees"),
    Template::new("Low stone markers line the road at intervals"),
    Template::new("The track continues, bordered by patches of grass and bare earth"),
    Template::new("A winding road passes through quiet, unremarkable country"),
    Template::new("The road dips and rises with the land, edged by hardy weeds"),
    Template::new("Well-worn cobbles show through the dust of the road"),
    Template::new("The road leads on through a mix of grass and scrub"),
    Template::new("Bright dust rises from the road with each gust of wind"),
];

const ROAD_SPARSE: [Template; 12] = [
    Template::new("A dusty road stretches through barren land, its edges bare of grass"),
    Template::new("The road runs across bleak, empty country"),
    Template::new("Cracked and rutted earth marks the path of the old road"),
    Template::new("Wind drives dust along a lonely track through barren ground"),
    Template::new("The road crosses a desolate landscape with little growing beside it"),
    Template::new("Stones poke through the worn surface of a neglected road"),
    Template::new("A narrow track cuts through dry, lifeless terrain"),
    Template::new("The road stretches on, flanked only by bare earth and scattered rocks"),
    Template::new("Weeds struggle through the hard-packed surface of the road"),
    Template::new("An empty road winds between patches of dead grass"),
    Template::new("The roadway is faint here, nearly lost among dust and stone"),
    Template::new("Bare, windswept ground borders the road on every side"),
];

#[cfg(test)]
mod tests {
    use super::*;

    const TIERS: [AbundanceTier; 3] = [
        AbundanceTier::Abundant,
        AbundanceTier::Moderate,
        AbundanceTier::Sparse,
    ];

    #[test]
    fn every_pool_has_at_least_twelve_templates() {
        for family in TerrainFamily::ALL {
            for tier in TIERS {
                assert!(pool(family, tier).len() >= 12, "{} {tier:?}", family.as_str());
            }
        }
    }

    #[test]
    fn forest_templates_carry_tree_slot() {
        for tier in TIERS {
            for template in pool(TerrainFamily::Forest, tier) {
                assert!(template.placeholders().contains(&"tree"), "{}", template.as_str());
            }
        }
        assert!(night_fallback(TerrainFamily::Forest).placeholders().contains(&"tree"));
    }

    #[test]
    fn other_families_have_no_slots() {
        for family in TerrainFamily::ALL.into_iter().filter(|f| *f != TerrainFamily::Forest) {
            for tier in TIERS {
                for template in pool(family, tier) {
                    assert!(template.placeholders().is_empty(), "{}", template.as_str());
                }
            }
        }
    }

    #[test]
    fn night_fallbacks_avoid_daylight_words() {
        for family in TerrainFamily::ALL {
            assert!(!night_fallback(family).mentions_any(&DAYLIGHT_WORDS));
        }
    }

    #[test]
    fn every_pool_has_night_safe_entries() {
        for family in TerrainFamily::ALL {
            for tier in TIERS {
                assert!(
                    pool(family, tier).iter().any(|t| !t.mentions_any(&DAYLIGHT_WORDS)),
                    "{} {tier:?}",
                    family.as_str()
                );
            }
        }
    }

    #[test]
    fn sectors_map_to_families() {
        assert_eq!(TerrainFamily::from_sector(SectorType::Forest), TerrainFamily::Forest);
        assert_eq!(TerrainFamily::from_sector(SectorType::Planes), TerrainFamily::Plains);
        assert_eq!(TerrainFamily::from_sector(SectorType::Ocean), TerrainFamily::Water);
        assert_eq!(TerrainFamily::from_sector(SectorType::HighMountain), TerrainFamily::Mountain);
        assert_eq!(TerrainFamily::from_sector(SectorType::RoadEastWest), TerrainFamily::Road);
        assert_eq!(TerrainFamily::from_sector(SectorType::City), TerrainFamily::Hills);
        assert!(TerrainFamily::Underwater.is_aquatic());
        assert!(!TerrainFamily::Beach.is_aquatic());
    }
}
