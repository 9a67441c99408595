//! Packing checklist and shopping list appended to every trip.

use crate::models::{
    extras::{PackingCategory, PackingItem, ShoppingItem},
    itinerary_item::LocalizedText,
};
use crate::services::country_service;

use PackingCategory::*;

const PACKING: &[(PackingCategory, &str, &str, bool)] = &[
    (Essentials, "Passport", "护照", true),
    (Essentials, "Visa documents", "签证材料", true),
    (Essentials, "Flight itinerary", "机票行程单", true),
    (Essentials, "Credit card", "信用卡", false),
    (Essentials, "Some local cash", "少量当地现金", false),
    (Gadgets, "Phone charger", "手机充电器", true),
    (Gadgets, "Power bank", "充电宝", false),
    (Gadgets, "Universal adapter", "万能转换插头", true),
    (Gadgets, "Earphones", "耳机", false),
    (Clothing, "Comfortable walking shoes", "舒适的步行鞋", false),
    (Clothing, "Light jacket", "薄外套", false),
    (Clothing, "Sleepwear", "睡衣", false),
    (Clothing, "Change of underwear", "换洗内衣", false),
    (Clothing, "Sunglasses", "太阳镜", false),
    (Toiletries, "Toothbrush and toothpaste", "牙刷牙膏", false),
    (Toiletries, "Sunscreen", "防晒霜", false),
    (Toiletries, "Travel-size skincare", "旅行装护肤品", false),
    (Toiletries, "Personal medication", "个人常用药", false),
];

/// Shopping suggestions with notional prices in the reference currency.
const SHOPPING: &[(&str, &str, f64)] = &[
    ("Local snacks", "当地零食", 120.0),
    ("Postcards", "明信片", 30.0),
    ("Fridge magnet", "冰箱贴", 40.0),
    ("Handmade craft", "手工艺品", 260.0),
    ("Skincare set", "护肤套装", 480.0),
];

pub fn packing_list() -> Vec<PackingItem> {
    PACKING
        .iter()
        .map(|(category, en, zh, checked)| PackingItem {
            category: *category,
            name: LocalizedText::new(*en, *zh),
            checked: *checked,
        })
        .collect()
}

pub fn shopping_list(country_code: &str) -> Vec<ShoppingItem> {
    let currency = country_service::currency_code(country_code);
    SHOPPING
        .iter()
        .map(|(en, zh, cny)| ShoppingItem {
            name: LocalizedText::new(*en, *zh),
            price: country_service::to_local(country_code, *cny),
            currency: currency.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packing_list_shape() {
        let list = packing_list();
        assert_eq!(list.len(), 18);
        assert_eq!(list.iter().filter(|item| item.checked).count(), 5);
        for category in [Essentials, Gadgets, Clothing, Toiletries] {
            assert!(list.iter().any(|item| item.category == category));
        }
        assert!(list.iter().all(|item| !item.name.en.is_empty() && !item.name.zh.is_empty()));
    }

    #[test]
    fn test_shopping_list_in_local_currency() {
        let list = shopping_list("JP");
        assert_eq!(list.len(), 5);
        assert!(list.iter().all(|item| item.currency == "JPY" && item.price > 0.0));
        assert_eq!(list[0].price, 2400.0);
    }
}
