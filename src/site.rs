//! Static content of the page.

use crate::grid::{GridConfig, MediaTile, PlaybackPolicy, CELL};
use crate::nav::{NavTarget, Planet};
use crate::rain::RainSettings;

pub const OWNER_DISPLAY_NAME: &str = "Junjie Wen / 文俊杰";
pub const RESEARCH_FOCUS: &str = "Research: Humanoid Learning";
pub const SCENE_URL: &str = "https://prod.spline.design/kZDDjO5HuC9GJUM2/scene.splinecode";

pub const BIO: [&str; 2] = [
    "Hello, I am Junjie Wen, you can also call me Jayce. I received my Master degree in East China Normal University(ECNU) advised by Chaomin Shen. Besides, I received my Bachelor degree in Software Engineering at Southwest Jiao Tong University(SWJTU).",
    "If you are interested in robotics or my work, please directly contact with me.",
];

pub fn nav_targets() -> Vec<NavTarget> {
    vec![
        NavTarget {
            id: "demos",
            label: "Demos",
            track_offset: 0.0,
            planet: Planet::Sun,
        },
        NavTarget {
            id: "highlights",
            label: "Highlights",
            track_offset: 80.0,
            planet: Planet::Earth,
        },
        NavTarget {
            id: "publications",
            label: "Papers",
            track_offset: 280.0,
            planet: Planet::Saturn,
        },
    ]
}

/// DOM id of the anchor element opening section `id`.
pub fn section_anchor_id(id: &str) -> String {
    format!("section-{id}")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProfileIcon {
    GitHub,
    Scholar,
    X,
    Email,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProfileLink {
    pub label: &'static str,
    pub href: &'static str,
    pub icon: ProfileIcon,
}

impl ProfileLink {
    /// `mailto:` links stay in the current tab.
    pub fn opens_new_tab(&self) -> bool {
        !self.href.starts_with("mailto:")
    }
}

pub const PROFILE_LINKS: [ProfileLink; 4] = [
    ProfileLink {
        label: "GitHub",
        href: "https://github.com/lesjie-wen",
        icon: ProfileIcon::GitHub,
    },
    ProfileLink {
        label: "Scholar",
        href: "https://scholar.google.com/citations?user=xphZoxIAAAAJ",
        icon: ProfileIcon::Scholar,
    },
    ProfileLink {
        label: "X",
        href: "https://x.com/lesjie298776",
        icon: ProfileIcon::X,
    },
    ProfileLink {
        label: "Email",
        href: "mailto:tsunami1999@163.com",
        icon: ProfileIcon::Email,
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Highlight {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub image: &'static str,
    pub href: &'static str,
}

pub const HIGHLIGHTS: [Highlight; 1] = [Highlight {
    title: "2025 EAIRCon - Invited Talk",
    subtitle: "2025 中国具身智能机器人大会",
    image: "/images/eaircon_talk.jpg",
    href: "http://eaircon.zhidx.com/2025/",
}];

pub fn rain_settings() -> RainSettings {
    RainSettings {
        opacity: 0.12,
        font_size: 14.0,
        speed: 0.4,
        ..RainSettings::default()
    }
}

pub fn demo_grid_config() -> GridConfig {
    GridConfig {
        hover_size: 6.0,
        gap_px: 3,
        playback: PlaybackPolicy::Autoplay,
        show_frames: false,
    }
}

fn demo_tile(
    id: u32,
    media_ref: &'static str,
    caption: &'static str,
    link_url: &'static str,
    grid_x: u32,
    grid_y: u32,
) -> MediaTile {
    MediaTile {
        id,
        media_ref,
        caption: Some(caption),
        link_url: Some(link_url),
        grid_x,
        grid_y,
        span_w: CELL,
        span_h: CELL,
        media_scale: 1.0,
        decor: None,
    }
}

pub fn demo_tiles() -> Vec<MediaTile> {
    vec![
        demo_tile(1, "/videos/dexvla_demo.mp4", "DexVLA", "https://dex-vla.github.io/", 0, 0),
        demo_tile(2, "/videos/gallary_1.mp4", "HumanoidExo", "https://humanoid-exo.github.io/", 4, 0),
        demo_tile(3, "/videos/gallary_chatvla2.mp4", "ChatVLA-2", "https://chatvla-2.github.io/", 8, 0),
        demo_tile(4, "/videos/active_umi.mp4", "ActiveUMI", "https://activeumi.github.io/", 0, 4),
        demo_tile(5, "/videos/humanoid.mp4", "HumanoidExo", "https://humanoid-exo.github.io/", 4, 4),
        demo_tile(6, "/videos/gallary2.mp4", "TinyVLA", "https://tiny-vla.github.io/", 8, 4),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{GridDimensions, GridLayout};
    use crate::nav::ScrollNavigator;

    #[test]
    fn page_track_is_valid() {
        assert!(ScrollNavigator::new(nav_targets()).is_ok());
    }

    #[test]
    fn demo_gallery_is_three_by_two() {
        let layout = GridLayout::new(demo_tiles(), demo_grid_config()).unwrap();
        assert_eq!(layout.dimensions(), GridDimensions { rows: 2, cols: 3 });
    }

    #[test]
    fn anchors_use_section_prefix() {
        assert_eq!(section_anchor_id("demos"), "section-demos");
    }

    #[test]
    fn only_mail_link_stays_in_tab() {
        let same_tab: Vec<&str> = PROFILE_LINKS
            .iter()
            .filter(|link| !link.opens_new_tab())
            .map(|link| link.label)
            .collect();
        assert_eq!(same_tab, vec!["Email"]);
    }
}
