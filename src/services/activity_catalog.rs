//! Static per-city activity catalog and restaurant lookup.
//!
//! Costs are in the destination's local currency. Cities without an entry
//! get a templated catalog built from the city name so generation never
//! runs dry on unknown input.

use crate::models::{
    activity::{ActivityCategory, CatalogActivity, Restaurant},
    itinerary_item::LocalizedText,
};
use crate::services::{country_service, timezone_service};

use ActivityCategory::*;

struct Entry {
    en: &'static str,
    zh: &'static str,
    category: ActivityCategory,
    cost: f64,
    minutes: u32,
    desc_en: &'static str,
    desc_zh: &'static str,
}

const fn e(
    en: &'static str,
    zh: &'static str,
    category: ActivityCategory,
    cost: f64,
    minutes: u32,
    desc_en: &'static str,
    desc_zh: &'static str,
) -> Entry {
    Entry { en, zh, category, cost, minutes, desc_en, desc_zh }
}

const TOKYO: &[Entry] = &[
    e("Senso-ji Temple", "浅草寺", History, 0.0, 90, "Tokyo's oldest temple and Nakamise street.", "东京最古老的寺庙与仲见世商店街。"),
    e("Meiji Jingu", "明治神宫", Culture, 0.0, 90, "Forested shrine beside Harajuku.", "原宿旁被森林环绕的神社。"),
    e("Shinjuku Gyoen", "新宿御苑", Nature, 500.0, 120, "Landscaped gardens in three styles.", "融合三种风格的庭园。"),
    e("teamLab Planets", "teamLab Planets", Activity, 3800.0, 120, "Immersive digital art museum.", "沉浸式数字艺术馆。"),
    e("Shibuya Sky", "涩谷SKY", Spot, 2200.0, 90, "Open-air rooftop over the scramble crossing.", "俯瞰十字路口的露天观景台。"),
    e("Ginza Shopping Street", "银座购物街", Shopping, 0.0, 150, "Flagship stores and department stores.", "旗舰店与百货公司云集。"),
    e("Akihabara Electric Town", "秋叶原电器街", Shopping, 0.0, 120, "Electronics, anime and retro games.", "电器、动漫与复古游戏。"),
    e("Tokyo National Museum", "东京国立博物馆", History, 1000.0, 120, "Japan's largest art collection.", "日本最大的艺术收藏。"),
    e("Tsukiji Outer Market", "筑地场外市场", Food, 3000.0, 90, "Street food and fresh seafood stalls.", "街头小吃与新鲜海鲜。"),
    e("Golden Gai", "黄金街", Nightlife, 2500.0, 120, "Tiny bars packed into six alleys.", "六条小巷中的迷你酒吧。"),
    e("Tokyo Tower", "东京塔", Spot, 1200.0, 60, "Retro lattice tower with city views.", "可眺望市景的经典铁塔。"),
];

const OSAKA: &[Entry] = &[
    e("Osaka Castle", "大阪城", History, 600.0, 120, "Reconstructed castle keep and park.", "重建的天守阁与公园。"),
    e("Dotonbori", "道顿堀", Food, 2500.0, 120, "Canal-side neon and street food.", "运河边的霓虹与小吃。"),
    e("Kuromon Market", "黑门市场", Food, 2000.0, 90, "The city's kitchen for seafood.", "大阪的海鲜厨房。"),
    e("Universal Studios Japan", "日本环球影城", Activity, 8600.0, 360, "Theme park rides and shows.", "主题乐园游乐设施与表演。"),
    e("Umeda Sky Building", "梅田蓝天大厦", Spot, 1500.0, 60, "Floating garden observatory.", "空中庭园展望台。"),
    e("Shinsaibashi-suji", "心斋桥筋商店街", Shopping, 0.0, 120, "Covered shopping arcade.", "有顶棚的购物长街。"),
    e("Minoo Park", "箕面公园", Nature, 0.0, 150, "Forest trail to a waterfall.", "通往瀑布的森林步道。"),
    e("Shitennoji Temple", "四天王寺", Culture, 300.0, 60, "One of Japan's oldest temples.", "日本最古老的寺院之一。"),
    e("Hozenji Yokocho", "法善寺横丁", Nightlife, 2000.0, 90, "Lantern-lit alley of izakaya.", "灯笼点亮的居酒屋小巷。"),
];

const SEOUL: &[Entry] = &[
    e("Gyeongbokgung Palace", "景福宫", History, 3000.0, 120, "Main royal palace of the Joseon dynasty.", "朝鲜王朝的正宫。"),
    e("Bukchon Hanok Village", "北村韩屋村", Culture, 0.0, 90, "Traditional houses on hillside lanes.", "山坡小巷中的传统韩屋。"),
    e("Namsan Seoul Tower", "南山首尔塔", Spot, 21000.0, 90, "Tower views over the whole city.", "俯瞰全城的观景塔。"),
    e("Myeongdong", "明洞", Shopping, 0.0, 150, "Cosmetics and street stalls.", "美妆店与街边小摊。"),
    e("Bukhansan National Park", "北汉山国立公园", Nature, 0.0, 240, "Granite peaks inside the city limits.", "城市边缘的花岗岩山峰。"),
    e("Gwangjang Market", "广藏市场", Food, 15000.0, 90, "Mung bean pancakes and bibimbap.", "绿豆煎饼与拌饭。"),
    e("Lotte World", "乐天世界", Activity, 62000.0, 300, "Indoor and outdoor theme park.", "室内外主题乐园。"),
    e("Hongdae", "弘大", Nightlife, 20000.0, 120, "Live music and student bars.", "现场音乐与酒吧。"),
    e("National Museum of Korea", "韩国国立中央博物馆", History, 0.0, 120, "Korean history from prehistory on.", "从史前开始的韩国历史。"),
];

const BANGKOK: &[Entry] = &[
    e("Grand Palace", "大皇宫", History, 500.0, 120, "Royal complex and the Emerald Buddha.", "王宫建筑群与玉佛寺。"),
    e("Wat Arun", "郑王庙", Culture, 100.0, 60, "Riverside temple of dawn.", "河畔的黎明寺。"),
    e("Wat Pho", "卧佛寺", Culture, 200.0, 60, "Reclining Buddha and massage school.", "卧佛与传统按摩学校。"),
    e("Chatuchak Weekend Market", "乍都乍周末市场", Shopping, 0.0, 180, "Over fifteen thousand stalls.", "超过一万五千个摊位。"),
    e("ICONSIAM", "暹罗天地", Shopping, 0.0, 150, "Riverside mega mall.", "河畔大型商场。"),
    e("Lumphini Park", "伦披尼公园", Nature, 0.0, 90, "Lakeside park with monitor lizards.", "有巨蜥出没的湖畔公园。"),
    e("Chao Phraya River Cruise", "湄南河游船", Spot, 300.0, 90, "Boat ride past the old city.", "乘船游览老城。"),
    e("Yaowarat Chinatown", "唐人街耀华力路", Food, 400.0, 120, "Night street food on Yaowarat Road.", "耀华力路夜间美食。"),
    e("Sky Bar Lebua", "莲花大酒店天空酒吧", Nightlife, 1200.0, 90, "Rooftop bar sixty-three floors up.", "63层的屋顶酒吧。"),
    e("Thai Cooking Class", "泰式烹饪课", Activity, 1500.0, 180, "Market visit and four-course class.", "逛市场并学做四道菜。"),
];

const PARIS: &[Entry] = &[
    e("Louvre Museum", "卢浮宫", History, 22.0, 180, "Home of the Mona Lisa.", "蒙娜丽莎的所在地。"),
    e("Eiffel Tower", "埃菲尔铁塔", Spot, 29.0, 120, "Summit views over the Seine.", "塔顶俯瞰塞纳河。"),
    e("Musee d'Orsay", "奥赛博物馆", Culture, 16.0, 150, "Impressionists in a former station.", "旧火车站中的印象派。"),
    e("Montmartre", "蒙马特高地", Culture, 0.0, 120, "Artists' hill and Sacre-Coeur.", "艺术家山丘与圣心堂。"),
    e("Luxembourg Gardens", "卢森堡公园", Nature, 0.0, 90, "Formal gardens of the Senate.", "参议院的法式花园。"),
    e("Galeries Lafayette", "老佛爷百货", Shopping, 0.0, 120, "Department store under a glass dome.", "玻璃穹顶下的百货公司。"),
    e("Seine River Cruise", "塞纳河游船", Spot, 17.0, 60, "Hour-long boat tour past the bridges.", "一小时游船穿过桥梁。"),
    e("Palace of Versailles", "凡尔赛宫", History, 21.0, 240, "Hall of Mirrors and royal gardens.", "镜厅与皇家花园。"),
    e("Le Marais Food Walk", "玛黑区美食漫步", Food, 45.0, 120, "Falafel, pastries and cheese shops.", "沙拉三明治、甜点与奶酪店。"),
    e("Moulin Rouge", "红磨坊", Nightlife, 120.0, 120, "The original cabaret revue.", "经典歌舞表演。"),
];

const LONDON: &[Entry] = &[
    e("British Museum", "大英博物馆", History, 0.0, 180, "World history in one building.", "一座建筑里的世界历史。"),
    e("Tower of London", "伦敦塔", History, 34.0, 150, "Crown Jewels and the White Tower.", "王冠珠宝与白塔。"),
    e("Hyde Park", "海德公园", Nature, 0.0, 90, "Royal park with the Serpentine lake.", "有蛇形湖的皇家公园。"),
    e("National Gallery", "英国国家美术馆", Culture, 0.0, 120, "Old masters on Trafalgar Square.", "特拉法加广场旁的名画。"),
    e("London Eye", "伦敦眼", Spot, 32.0, 60, "Observation wheel on the South Bank.", "南岸的观景摩天轮。"),
    e("Covent Garden", "科文特花园", Shopping, 0.0, 120, "Market hall and street performers.", "市场大厅与街头艺人。"),
    e("Borough Market", "博罗市场", Food, 20.0, 90, "Historic food market by London Bridge.", "伦敦桥边的老牌食品市场。"),
    e("West End Musical", "西区音乐剧", Nightlife, 80.0, 180, "Evening show in Theatreland.", "剧院区的晚间演出。"),
    e("Kew Gardens", "邱园", Nature, 22.0, 180, "Botanic gardens and glasshouses.", "植物园与温室。"),
    e("Thames Clipper", "泰晤士河快船", Activity, 12.0, 60, "River bus from Westminster to Greenwich.", "从威斯敏斯特到格林尼治的河上巴士。"),
];

const SYDNEY: &[Entry] = &[
    e("Sydney Opera House Tour", "悉尼歌剧院导览", Culture, 45.0, 90, "Behind the sails of the Opera House.", "走进歌剧院的帆形屋顶。"),
    e("Harbour Bridge Climb", "攀登海港大桥", Activity, 280.0, 210, "Climb to the top of the arch.", "攀上大桥拱顶。"),
    e("Bondi to Coogee Walk", "邦迪至库吉海岸步道", Nature, 0.0, 150, "Clifftop coastal walk.", "悬崖海岸步道。"),
    e("Royal Botanic Garden", "皇家植物园", Nature, 0.0, 90, "Harbourside gardens.", "港湾边的植物园。"),
    e("The Rocks", "岩石区", History, 0.0, 90, "Colonial-era lanes and markets.", "殖民时期的小巷与市集。"),
    e("Queen Victoria Building", "维多利亚女王大厦", Shopping, 0.0, 90, "Romanesque shopping arcade.", "罗马式购物拱廊。"),
    e("Taronga Zoo", "塔龙加动物园", Spot, 51.0, 180, "Koalas with a harbour view.", "能看港景的考拉乐园。"),
    e("Darling Harbour", "达令港", Spot, 0.0, 90, "Waterfront promenade.", "海滨长廊。"),
    e("Sydney Fish Market", "悉尼鱼市场", Food, 40.0, 90, "Fresh oysters and sashimi.", "新鲜生蚝与刺身。"),
    e("Ivy Rooftop", "Ivy屋顶酒吧", Nightlife, 60.0, 120, "Rooftop pool bar in the CBD.", "市中心的屋顶泳池酒吧。"),
];

fn entries_for(city: &str) -> Option<&'static [Entry]> {
    let profile = timezone_service::lookup_city(city)?;
    match profile.en {
        "Tokyo" => Some(TOKYO),
        "Osaka" => Some(OSAKA),
        "Seoul" => Some(SEOUL),
        "Bangkok" => Some(BANGKOK),
        "Paris" => Some(PARIS),
        "London" => Some(LONDON),
        "Sydney" => Some(SYDNEY),
        _ => None,
    }
}

/// Bilingual display names of a city; unknown cities keep the given name.
pub fn city_names(city: &str) -> LocalizedText {
    match timezone_service::lookup_city(city) {
        Some(profile) => LocalizedText::new(profile.en, profile.zh),
        None => LocalizedText::new(city.trim(), city.trim()),
    }
}

/// The activity catalog of a city, or a templated generic catalog.
pub fn catalog_for(city: &str, country_code: &str) -> Vec<CatalogActivity> {
    match entries_for(city) {
        Some(entries) => entries
            .iter()
            .map(|entry| CatalogActivity {
                name: LocalizedText::new(entry.en, entry.zh),
                category: entry.category,
                cost: entry.cost,
                description: LocalizedText::new(entry.desc_en, entry.desc_zh),
                duration_minutes: entry.minutes,
            })
            .collect(),
        None => {
            log::debug!("No catalog for '{}', building generic entries", city);
            generic_catalog(&city_names(city), country_code)
        }
    }
}

fn generic_catalog(city: &LocalizedText, country_code: &str) -> Vec<CatalogActivity> {
    let templates: [(&str, &str, ActivityCategory, f64, u32); 8] = [
        ("{} Old Town", "{}老城区", History, 0.0, 120),
        ("{} City Museum", "{}城市博物馆", Culture, 80.0, 120),
        ("{} Central Park", "{}中央公园", Nature, 0.0, 90),
        ("{} Main Market", "{}中心市场", Shopping, 0.0, 120),
        ("{} Observation Deck", "{}观景台", Spot, 100.0, 60),
        ("{} Food Street", "{}美食街", Food, 120.0, 90),
        ("{} Bike Tour", "{}骑行游览", Activity, 150.0, 150),
        ("{} Night Market", "{}夜市", Nightlife, 60.0, 120),
    ];

    templates
        .iter()
        .map(|(en, zh, category, cny, minutes)| CatalogActivity {
            name: LocalizedText::new(en.replace("{}", &city.en), zh.replace("{}", &city.zh)),
            category: *category,
            cost: country_service::to_local(country_code, *cny),
            description: LocalizedText::new(
                format!("A local favourite in {}.", city.en),
                format!("{}当地人喜爱的去处。", city.zh),
            ),
            duration_minutes: *minutes,
        })
        .collect()
}

const RESTAURANTS: &[(&str, &[(&str, &str)])] = &[
    ("Tokyo", &[
        ("Sushi Dai", "寿司大"),
        ("Ichiran Shibuya", "一兰拉面涩谷店"),
        ("Gonpachi Nishi-Azabu", "权八西麻布"),
        ("Tempura Kondo", "天妇罗近藤"),
    ]),
    ("Osaka", &[
        ("Mizuno", "美津の"),
        ("Kani Doraku Dotonbori", "螃蟹道乐道顿堀店"),
        ("Daruma Shinsekai", "达摩串炸新世界店"),
    ]),
    ("Seoul", &[
        ("Maple Tree House", "枫树屋"),
        ("Tosokchon Samgyetang", "土俗村参鸡汤"),
        ("Jinokdahoe", "镇玉多会"),
    ]),
    ("Bangkok", &[
        ("Jay Fai", "痣姐餐厅"),
        ("Thipsamai Pad Thai", "鬼门炒粉"),
        ("Baan Khanitha", "Baan Khanitha泰菜馆"),
    ]),
    ("Paris", &[
        ("Bouillon Chartier", "夏蒂埃肉汤餐厅"),
        ("Le Relais de l'Entrecote", "牛排小馆"),
        ("L'As du Fallafel", "法拉费之王"),
    ]),
    ("London", &[
        ("Dishoom Covent Garden", "Dishoom印度餐厅"),
        ("The Churchill Arms", "丘吉尔酒馆"),
        ("Rules", "Rules餐厅"),
    ]),
    ("Sydney", &[
        ("Quay", "Quay餐厅"),
        ("Mr. Wong", "王先生"),
        ("Harry's Cafe de Wheels", "哈利肉派车"),
    ]),
];

/// The one restaurant lookup used by every meal on every day.
pub fn restaurants_for(city: &str) -> Vec<Restaurant> {
    let Some(profile) = timezone_service::lookup_city(city) else {
        return Vec::new();
    };
    RESTAURANTS
        .iter()
        .find(|(key, _)| *key == profile.en)
        .map(|(_, rows)| {
            rows.iter()
                .map(|(en, zh)| Restaurant {
                    name: LocalizedText::new(*en, *zh),
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_known_catalog_names_are_unique() {
        for city in ["Tokyo", "Osaka", "Seoul", "Bangkok", "Paris", "London", "Sydney"] {
            let catalog = catalog_for(city, "");
            assert!(catalog.len() >= 8, "{} catalog too small", city);
            let names: HashSet<_> = catalog.iter().map(|a| a.name.en.clone()).collect();
            assert_eq!(names.len(), catalog.len(), "duplicate names in {}", city);
        }
    }

    #[test]
    fn test_generic_catalog_for_unknown_city() {
        let catalog = catalog_for("Atlantis", "ZZ");
        assert_eq!(catalog.len(), 8);
        assert!(catalog.iter().all(|a| a.name.en.starts_with("Atlantis")));
        assert!(catalog.iter().any(|a| a.category == ActivityCategory::Nightlife));
    }

    #[test]
    fn test_restaurants_lookup() {
        assert!(!restaurants_for("paris").is_empty());
        assert!(restaurants_for("Singapore").is_empty());
        assert!(restaurants_for("Atlantis").is_empty());
    }

    #[test]
    fn test_city_names() {
        assert_eq!(city_names("tokyo").zh, "东京");
        assert_eq!(city_names(" Atlantis ").en, "Atlantis");
    }
}
