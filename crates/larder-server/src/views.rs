// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! HTML views.
//!
//! Three pages: `index` (all items), `item_detail` (one item) and `error`.
//! maud escapes every spliced value.

use larder_server_db::Item;
use maud::{html, Markup, DOCTYPE};

fn layout(title: &str, body: Markup) -> Markup {
	html! {
		(DOCTYPE)
		html lang="en" {
			head {
				meta charset="utf-8";
				meta name="viewport" content="width=device-width, initial-scale=1";
				title { (title) " · Larder" }
				link rel="stylesheet" href="/static/style.css";
			}
			body {
				header {
					a.brand href="/" { "Larder" }
				}
				main { (body) }
			}
		}
	}
}

fn delete_form(item: &Item) -> Markup {
	html! {
		form.inline method="post" action={ "/items/" (item.id) "/delete" } {
			button.danger type="submit" { "Delete" }
		}
	}
}

/// Item list with a create form.
pub fn index(items: &[Item]) -> Markup {
	layout(
		"Items",
		html! {
			h1 { "Items" }
			form.create method="post" action="/items/" {
				label for="name" { "Name" }
				input #name type="text" name="name" required;
				button type="submit" { "Add item" }
			}
			@if items.is_empty() {
				p.empty { "No items yet." }
			} @else {
				ul.items {
					@for item in items {
						li {
							a href={ "/items/" (item.id) } { (item.name) }
							(delete_form(item))
						}
					}
				}
			}
		},
	)
}

/// Single item.
pub fn item_detail(item: &Item) -> Markup {
	layout(
		&item.name,
		html! {
			h1 { (item.name) }
			dl {
				dt { "ID" }
				dd { (item.id) }
				dt { "Name" }
				dd { (item.name) }
			}
			(delete_form(item))
			p { a href="/" { "Back to items" } }
		},
	)
}

pub fn error_page(message: &str) -> Markup {
	layout(
		"Error",
		html! {
			h1 { "Error" }
			p.error { (message) }
			p { a href="/" { "Back to items" } }
		},
	)
}
