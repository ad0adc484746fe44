//! Seed fixtures for the default dataset.
//!
//! Book 6 deliberately references an author id with no catalog row so the
//! "Unknown Author" fallback stays exercised end to end.

use bookstock_core::{
  catalog::{Author, Book, BookFormat, Store},
  inventory::InventoryItem,
  session::{Role, User},
};

use crate::dataset::DevUser;

pub(crate) fn books() -> Vec<Book> {
  vec![
    Book {
      id:         1,
      author_id:  2,
      title:      "A Winter of Glass".into(),
      isbn:       "412873650-1".into(),
      language:   "English".into(),
      page_count: 312,
      format:     BookFormat::Paperback,
    },
    Book {
      id:         2,
      author_id:  5,
      title:      "The Cartographer's Daughter".into(),
      isbn:       "903154782-6".into(),
      language:   "English".into(),
      page_count: 448,
      format:     BookFormat::Hardcover,
    },
    Book {
      id:         3,
      author_id:  3,
      title:      "Salt and Starlight".into(),
      isbn:       "277460981-3".into(),
      language:   "Spanish".into(),
      page_count: 201,
      format:     BookFormat::Paperback,
    },
    Book {
      id:         4,
      author_id:  1,
      title:      "Notes from the Harbour".into(),
      isbn:       "660128374-9".into(),
      language:   "English".into(),
      page_count: 156,
      format:     BookFormat::Ebook,
    },
    Book {
      id:         5,
      author_id:  3,
      title:      "The Orchard Wall".into(),
      isbn:       "518209467-5".into(),
      language:   "French".into(),
      page_count: 389,
      format:     BookFormat::Paperback,
    },
    Book {
      id:         6,
      author_id:  99,
      title:      "An Atlas of Small Rivers".into(),
      isbn:       "745391208-0".into(),
      language:   "English".into(),
      page_count: 274,
      format:     BookFormat::Hardcover,
    },
  ]
}

pub(crate) fn authors() -> Vec<Author> {
  vec![
    Author { id: 1, first_name: "Margaret".into(), last_name: "Holloway".into() },
    Author { id: 2, first_name: "Tomas".into(), last_name: "Rivera".into() },
    Author { id: 3, first_name: "Imogen".into(), last_name: "Clarke".into() },
    Author { id: 4, first_name: "Samuel".into(), last_name: "Osei".into() },
    Author { id: 5, first_name: "Petra".into(), last_name: "Lindqvist".into() },
  ]
}

pub(crate) fn stores() -> Vec<Store> {
  vec![
    Store { id: 1, name: "Main Street Bookstore".into(), address: "123 Main St".into() },
    Store { id: 2, name: "Downtown Books".into(), address: "456 Oak Ave".into() },
    Store { id: 3, name: "Harbour Lane Books".into(), address: "12 Harbour Ln".into() },
  ]
}

pub(crate) fn inventory() -> Vec<InventoryItem> {
  vec![
    InventoryItem { id: 1, store_id: 1, book_id: 1, price: 29.99 },
    InventoryItem { id: 2, store_id: 1, book_id: 2, price: 19.99 },
    InventoryItem { id: 3, store_id: 2, book_id: 1, price: 27.99 },
    InventoryItem { id: 4, store_id: 2, book_id: 3, price: 24.99 },
    InventoryItem { id: 5, store_id: 3, book_id: 2, price: 21.99 },
  ]
}

/// The three hardcoded development accounts. Plaintext passwords are a
/// fixture property, same as every other seed row here.
pub(crate) fn dev_users() -> Vec<DevUser> {
  vec![
    DevUser {
      user:     User {
        id:       1,
        username: "admin".into(),
        name:     "Admin User".into(),
        role:     Role::Admin,
      },
      password: "admin123".into(),
    },
    DevUser {
      user:     User {
        id:       2,
        username: "manager".into(),
        name:     "Store Manager".into(),
        role:     Role::Manager,
      },
      password: "manager123".into(),
    },
    DevUser {
      user:     User {
        id:       3,
        username: "user".into(),
        name:     "Regular User".into(),
        role:     Role::User,
      },
      password: "user123".into(),
    },
  ]
}
