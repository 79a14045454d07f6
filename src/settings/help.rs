//! Static help content shown on the settings page

use serde::Serialize;

#[derive(Clone, Copy, Debug, Serialize)]
pub struct HelpTab {
	pub id: &'static str,
	pub title: &'static str,
	pub content: &'static str,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct HelpLink {
	pub label: &'static str,
	pub href: &'static str,
}

pub const HELP_TABS: &[HelpTab] = &[
	HelpTab {
		id: "agm-overview",
		title: "Overview",
		content: "<p><strong>Thanks for using the map widget</strong><br>\
			Configure the options below and save your settings. Embed the widget \
			snippet on your page to show the map with the configured center, zoom \
			and marker.</p>",
	},
	HelpTab {
		id: "agm-troubleshoot",
		title: "Troubleshoot",
		content: "<p><strong>Things to remember</strong></p>\
			<ul>\
			<li>If you are using a page cache, flush it after saving settings here.</li>\
			<li>Only one map is supported at this time. Don&apos;t embed the widget twice on the same page.</li>\
			<li>Only one marker is supported at this time. The marker is positioned at the center of your map.</li>\
			<li>The info window needs the marker to be enabled first.</li>\
			</ul>",
	},
	HelpTab {
		id: "agm-more-info",
		title: "More",
		content: "<p><strong>Need more information?</strong><br>\
			A brief FAQ is available on the project site. Support requests and bug \
			reports are handled on the project&apos;s issue tracker.</p>",
	},
];

pub const SIDEBAR_LINKS: &[HelpLink] = &[
	HelpLink { label: "Widget FAQ", href: "https://github.com/agm/agm-server/wiki/FAQ" },
	HelpLink { label: "Project home", href: "https://github.com/agm/agm-server" },
];

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_help_has_three_tabs_and_sidebar() {
		assert_eq!(HELP_TABS.len(), 3);
		assert!(!SIDEBAR_LINKS.is_empty());
		for tab in HELP_TABS {
			assert!(!tab.id.is_empty());
			assert!(!tab.title.is_empty());
			assert!(!tab.content.is_empty());
		}
	}
}

// vim: ts=4
