use chrono::NaiveDate;

use crate::models::order::{Order, OrderStatus};

/// The demo dataset every session starts from.
///
/// Photo and decision fields are filled in so that each seeded status matches
/// what the lifecycle would have produced for that order.
pub fn demo_orders() -> Vec<Order> {
    vec![
        Order {
            id: "001".to_string(),
            customer_name: "John Doe".to_string(),
            customer_address: "123 Main St, City, State 12345".to_string(),
            customer_mobile: "+1234567890".to_string(),
            products: vec!["Smartphone".to_string(), "Wireless Headphones".to_string()],
            status: OrderStatus::Pending,
            dispatch_photo: None,
            return_photo: None,
            return_reason: None,
            return_accepted: None,
            order_date: date(2024, 1, 15),
            total_amount: 899.99,
        },
        Order {
            id: "002".to_string(),
            customer_name: "Jane Smith".to_string(),
            customer_address: "456 Oak Ave, City, State 67890".to_string(),
            customer_mobile: "+1234567891".to_string(),
            products: vec![
                "Laptop".to_string(),
                "Mouse".to_string(),
                "Keyboard".to_string(),
            ],
            status: OrderStatus::Dispatched,
            dispatch_photo: Some("photos/002-dispatch.jpg".to_string()),
            return_photo: None,
            return_reason: None,
            return_accepted: None,
            order_date: date(2024, 1, 14),
            total_amount: 1299.99,
        },
        Order {
            id: "003".to_string(),
            customer_name: "Mike Johnson".to_string(),
            customer_address: "789 Pine Rd, City, State 11111".to_string(),
            customer_mobile: "+1234567892".to_string(),
            products: vec!["Tablet".to_string(), "Case".to_string()],
            status: OrderStatus::Delivered,
            dispatch_photo: Some("photos/003-dispatch.jpg".to_string()),
            return_photo: Some("photos/003-return.jpg".to_string()),
            return_reason: Some("screen flickers".to_string()),
            return_accepted: Some(false),
            order_date: date(2024, 1, 13),
            total_amount: 549.99,
        },
        Order {
            id: "004".to_string(),
            customer_name: "Sarah Wilson".to_string(),
            customer_address: "321 Elm St, City, State 22222".to_string(),
            customer_mobile: "+1234567893".to_string(),
            products: vec!["Smart Watch".to_string(), "Charger".to_string()],
            status: OrderStatus::ReturnPending,
            dispatch_photo: Some("photos/004-dispatch.jpg".to_string()),
            return_photo: Some("photos/004-return.jpg".to_string()),
            return_reason: Some("wrong strap size".to_string()),
            return_accepted: None,
            order_date: date(2024, 1, 12),
            total_amount: 299.99,
        },
    ]
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid seed date")
}
