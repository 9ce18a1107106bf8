//! Localized interface text (Russian).

pub const CATALOG_HEADING: &str = "Каталог товаров";
pub const CATALOG_EMPTY: &str = "Нет товаров в витрине";
pub const CATALOG_EMPTY_HINT: &str = "Попробуйте изменить фильтры или обновить страницу.";

pub const CART_HEADING: &str = "Корзина";
pub const CART_EMPTY: &str = "Корзина пуста";
pub const CART_POSITIONS: &str = "Позиций:";
pub const CART_UNITS: &str = "Всего единиц:";
pub const CART_TOTAL: &str = "Итого:";

pub const ADD_TO_CART: &str = "В корзину";
pub const REMOVE_FROM_CART: &str = "Удалить из корзины";
pub const ITEM_ADDED: &str = "Товар добавлен в корзину.";
pub const ITEM_REMOVED: &str = "Товар удалён из корзины.";

/// Picks the Russian plural form for `n`.
///
/// `one` for 1, 21, 101 ...; `few` for 2-4, 22-24 ...; `many` otherwise
/// (including 11-14).
pub fn plural_ru<'a>(n: usize, one: &'a str, few: &'a str, many: &'a str) -> &'a str {
    let n10 = n % 10;
    let n100 = n % 100;
    if n10 == 1 && n100 != 11 {
        return one;
    }
    if (2..=4).contains(&n10) && !(12..=14).contains(&n100) {
        return few;
    }
    many
}

/// "позиция" in the right form for `n`.
pub fn positions(n: usize) -> &'static str {
    plural_ru(n, "позиция", "позиции", "позиций")
}
