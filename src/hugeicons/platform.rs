//! Static per-platform usage documentation

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;

/// Frameworks with an official Hugeicons package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, JsonSchema, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    React,
    Vue,
    Angular,
    Svelte,
    ReactNative,
    Flutter,
}

impl Platform {
    pub const ALL: [Platform; 6] = [
        Platform::React,
        Platform::Vue,
        Platform::Angular,
        Platform::Svelte,
        Platform::ReactNative,
        Platform::Flutter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::React => "react",
            Platform::Vue => "vue",
            Platform::Angular => "angular",
            Platform::Svelte => "svelte",
            Platform::ReactNative => "react-native",
            Platform::Flutter => "flutter",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::React => "React",
            Platform::Vue => "Vue",
            Platform::Angular => "Angular",
            Platform::Svelte => "Svelte",
            Platform::ReactNative => "React Native",
            Platform::Flutter => "Flutter",
        }
    }

    /// Case-insensitive lookup, ignoring surrounding whitespace
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_lowercase();
        Self::ALL.into_iter().find(|p| p.as_str() == value)
    }

    const NAMES: &'static [&'static str] =
        &["react", "vue", "angular", "svelte", "react-native", "flutter"];

    /// Comma-separated list of every supported platform, for error messages
    pub fn supported() -> String {
        Self::ALL
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn usage(&self) -> &'static PlatformUsage {
        match self {
            Platform::React => &REACT,
            Platform::Vue => &VUE,
            Platform::Angular => &ANGULAR,
            Platform::Svelte => &SVELTE,
            Platform::ReactNative => &REACT_NATIVE,
            Platform::Flutter => &FLUTTER,
        }
    }

    fn code_language(&self) -> &'static str {
        match self {
            Platform::React | Platform::ReactNative => "tsx",
            Platform::Vue => "vue",
            Platform::Angular => "typescript",
            Platform::Svelte => "svelte",
            Platform::Flutter => "dart",
        }
    }

    fn install_language(&self) -> &'static str {
        match self {
            Platform::Flutter => "yaml",
            _ => "bash",
        }
    }
}

/// Accepts any letter case and surrounding whitespace
impl<'de> Deserialize<'de> for Platform {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Platform::parse(&raw).ok_or_else(|| de::Error::unknown_variant(&raw, Self::NAMES))
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize)]
pub struct Installation {
    pub core: &'static str,
    pub packages: &'static [&'static str],
}

/// One documented component property
#[derive(Debug, Serialize)]
pub struct PropDoc {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<&'static str>,
    pub description: &'static str,
}

/// Installation and usage guide for one platform
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformUsage {
    pub platform: Platform,
    pub installation: Installation,
    pub basic_usage: &'static str,
    pub props: &'static [PropDoc],
}

impl PlatformUsage {
    /// Render as a markdown guide for the `hugeicons://docs/platforms/*` resources
    pub fn to_markdown(&self) -> String {
        let platform = self.platform;
        let mut md = format!("# {} Usage Guide\n\n", platform.display_name());

        md.push_str("## Installation\n\n");
        md.push_str(&format!(
            "```{}\n{}\n```\n\n",
            platform.install_language(),
            self.installation.core
        ));

        if !self.installation.packages.is_empty() {
            md.push_str("### Icon style packages\n\n");
            for package in self.installation.packages {
                md.push_str(&format!("- `{}`\n", package));
            }
            md.push('\n');
        }

        md.push_str("## Basic Usage\n\n");
        md.push_str(&format!(
            "```{}\n{}\n```\n",
            platform.code_language(),
            self.basic_usage
        ));

        if !self.props.is_empty() {
            md.push_str("\n## Props\n\n");
            md.push_str("| Name | Type | Default | Description |\n");
            md.push_str("|------|------|---------|-------------|\n");
            for prop in self.props {
                md.push_str(&format!(
                    "| `{}` | `{}` | {} | {} |\n",
                    prop.name,
                    prop.kind,
                    prop.default.map(|d| format!("`{}`", d)).unwrap_or_else(|| "-".to_string()),
                    prop.description
                ));
            }
        }

        md
    }
}

const CORE_PACKAGES: &[&str] = &[
    "@hugeicons-pro/core-stroke-rounded",
    "@hugeicons-pro/core-stroke-sharp",
    "@hugeicons-pro/core-stroke-standard",
    "@hugeicons-pro/core-solid-rounded",
    "@hugeicons-pro/core-solid-sharp",
    "@hugeicons-pro/core-solid-standard",
    "@hugeicons-pro/core-bulk-rounded",
    "@hugeicons-pro/core-duotone-rounded",
    "@hugeicons-pro/core-twotone-rounded",
];

const PROP_ICON: PropDoc = PropDoc {
    name: "icon",
    kind: "IconSvgObject",
    default: Some("Required"),
    description: "The main icon component imported from an icon package",
};
const PROP_ALT_ICON: PropDoc = PropDoc {
    name: "altIcon",
    kind: "IconSvgObject",
    default: None,
    description: "Alternative icon component from an icon package for states, interactions, or animations",
};
const PROP_SHOW_ALT: PropDoc = PropDoc {
    name: "showAlt",
    kind: "boolean",
    default: Some("false"),
    description: "When true, displays the altIcon instead of the main icon",
};
const PROP_SIZE: PropDoc = PropDoc {
    name: "size",
    kind: "number",
    default: Some("24"),
    description: "Icon size in pixels",
};
const PROP_COLOR: PropDoc = PropDoc {
    name: "color",
    kind: "string",
    default: Some("currentColor"),
    description: "Icon color (CSS color value)",
};
const PROP_STROKE_WIDTH: PropDoc = PropDoc {
    name: "strokeWidth",
    kind: "number",
    default: Some("1.5"),
    description: "Width of the icon strokes (works with stroke-style icons)",
};
const PROP_CLASS: PropDoc = PropDoc {
    name: "class",
    kind: "string",
    default: None,
    description: "Additional CSS classes",
};

const WEB_PROPS: &[PropDoc] = &[
    PROP_ICON,
    PROP_ALT_ICON,
    PROP_SHOW_ALT,
    PROP_SIZE,
    PROP_COLOR,
    PROP_STROKE_WIDTH,
    PROP_CLASS,
];

static REACT: PlatformUsage = PlatformUsage {
    platform: Platform::React,
    installation: Installation {
        core: "npm install @hugeicons/react",
        packages: CORE_PACKAGES,
    },
    basic_usage: r#"import { HugeiconsIcon } from '@hugeicons/react'
import { Notification03Icon } from '@hugeicons/core-free-icons'

function App() {
    return <HugeiconsIcon icon={Notification03Icon} size={24} color="currentColor" strokeWidth={1.5} />
}"#,
    props: &[
        PROP_ICON,
        PROP_ALT_ICON,
        PROP_SHOW_ALT,
        PROP_SIZE,
        PROP_COLOR,
        PROP_STROKE_WIDTH,
        PropDoc {
            name: "className",
            kind: "string",
            default: None,
            description: "Additional CSS classes",
        },
    ],
};

static VUE: PlatformUsage = PlatformUsage {
    platform: Platform::Vue,
    installation: Installation {
        core: "npm install @hugeicons/vue",
        packages: CORE_PACKAGES,
    },
    basic_usage: r#"<script setup>
import { HugeiconsIcon } from '@hugeicons/vue'
import { Notification03Icon } from '@hugeicons/core-free-icons'
</script>

<template>
    <HugeiconsIcon :icon="Notification03Icon" :size="24" color="currentColor" :strokeWidth="1.5" />
</template>"#,
    props: WEB_PROPS,
};

static ANGULAR: PlatformUsage = PlatformUsage {
    platform: Platform::Angular,
    installation: Installation {
        core: "npm install @hugeicons/angular",
        packages: CORE_PACKAGES,
    },
    basic_usage: r#"// your.component.ts
import { Component } from '@angular/core'
import { Notification03Icon } from '@hugeicons/core-free-icons'

@Component({
    selector: 'app-example',
    template: ` <hugeicons-icon [icon]="notification03Icon" [size]="24" color="currentColor" [strokeWidth]="1.5"></hugeicons-icon> `,
})
export class ExampleComponent {
    notification03Icon = Notification03Icon
}"#,
    props: WEB_PROPS,
};

static SVELTE: PlatformUsage = PlatformUsage {
    platform: Platform::Svelte,
    installation: Installation {
        core: "npm install @hugeicons/svelte",
        packages: CORE_PACKAGES,
    },
    basic_usage: r#"<script>
  import { HugeiconsIcon } from '@hugeicons/svelte'
  import { Notification03Icon } from '@hugeicons/core-free-icons'
</script>

<HugeiconsIcon icon={Notification03Icon} size={24} color="currentColor" strokeWidth={1.5} />"#,
    props: WEB_PROPS,
};

static REACT_NATIVE: PlatformUsage = PlatformUsage {
    platform: Platform::ReactNative,
    installation: Installation {
        core: "npm install @hugeicons/react-native",
        packages: CORE_PACKAGES,
    },
    basic_usage: r##"import { HugeiconsIcon } from '@hugeicons/react-native'
import { Notification03Icon } from '@hugeicons/core-free-icons'

export default function App() {
  return <HugeiconsIcon icon={Notification03Icon} size={24} color="#000000" strokeWidth={1.5} />
}"##,
    props: &[
        PROP_ICON,
        PROP_ALT_ICON,
        PROP_SHOW_ALT,
        PROP_SIZE,
        PropDoc {
            name: "color",
            kind: "string",
            default: Some("#000000"),
            description: "Icon color (color string)",
        },
        PROP_STROKE_WIDTH,
    ],
};

// Flutter ships every style in one pub package
static FLUTTER: PlatformUsage = PlatformUsage {
    platform: Platform::Flutter,
    installation: Installation {
        core: "hugeicons: ^0.0.10",
        packages: &[],
    },
    basic_usage: r#"import 'package:hugeicons/hugeicons.dart';

// Example usage in a widget
HugeIcon(
  icon: HugeIcons.strokeRoundedHome01,
  color: Colors.red,
  size: 30.0,
),"#,
    props: &[
        PropDoc {
            name: "icon",
            kind: "HugeIcons",
            default: Some("Required"),
            description: "The icon to display from HugeIcons collection",
        },
        PropDoc {
            name: "size",
            kind: "double",
            default: Some("24.0"),
            description: "Icon size in logical pixels",
        },
        PropDoc {
            name: "color",
            kind: "Color",
            default: Some("Colors.black"),
            description: "Icon color from Flutter Colors",
        },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_platform() {
        assert_eq!(Platform::parse("react"), Some(Platform::React));
        assert_eq!(Platform::parse("  React-Native "), Some(Platform::ReactNative));
        assert_eq!(Platform::parse("FLUTTER"), Some(Platform::Flutter));
        assert_eq!(Platform::parse("html"), None);
        assert_eq!(Platform::parse(""), None);
    }

    #[test]
    fn test_deserialize_is_lenient_and_lists_supported() {
        let platform: Platform = serde_json::from_value(json!(" Angular ")).unwrap();
        assert_eq!(platform, Platform::Angular);

        let err = serde_json::from_value::<Platform>(json!("html")).unwrap_err();
        assert!(err.to_string().contains("unknown variant `html`"));
        assert!(err.to_string().contains("react-native"));
    }

    #[test]
    fn test_supported_list() {
        assert_eq!(
            Platform::supported(),
            "react, vue, angular, svelte, react-native, flutter"
        );
    }

    #[test]
    fn test_every_platform_has_usage() {
        for platform in Platform::ALL {
            let usage = platform.usage();
            assert_eq!(usage.platform, platform);
            assert!(!usage.installation.core.is_empty());
            assert!(!usage.basic_usage.is_empty());
            assert!(!usage.props.is_empty());
        }
    }

    #[test]
    fn test_usage_serializes_like_documentation() {
        let value = serde_json::to_value(Platform::React.usage()).unwrap();
        assert_eq!(value["platform"], "react");
        assert_eq!(value["installation"]["core"], "npm install @hugeicons/react");
        assert_eq!(value["installation"]["packages"].as_array().unwrap().len(), 9);
        assert!(value["basicUsage"].as_str().unwrap().contains("HugeiconsIcon"));
        assert_eq!(
            value["props"][0],
            json!({
                "name": "icon",
                "type": "IconSvgObject",
                "default": "Required",
                "description": "The main icon component imported from an icon package"
            })
        );
        assert!(value["props"][1].get("default").is_none());
        assert_eq!(value["props"][6]["name"], "className");
    }

    #[test]
    fn test_flutter_has_no_packages() {
        let value = serde_json::to_value(Platform::Flutter.usage()).unwrap();
        assert_eq!(value["installation"]["core"], "hugeicons: ^0.0.10");
        assert_eq!(value["installation"]["packages"], json!([]));
    }

    #[test]
    fn test_markdown_rendering() {
        let md = Platform::ReactNative.usage().to_markdown();
        assert!(md.starts_with("# React Native Usage Guide\n"));
        assert!(md.contains("```bash\nnpm install @hugeicons/react-native\n```"));
        assert!(md.contains("- `@hugeicons-pro/core-stroke-rounded`"));
        assert!(md.contains("| `color` | `string` | `#000000` | Icon color (color string) |"));
        assert!(md.contains("| `altIcon` | `IconSvgObject` | - |"));

        let flutter = Platform::Flutter.usage().to_markdown();
        assert!(flutter.contains("```yaml\nhugeicons: ^0.0.10\n```"));
        assert!(!flutter.contains("Icon style packages"));
        assert!(flutter.contains("```dart\n"));
    }

    #[test]
    fn test_platform_serde_names() {
        assert_eq!(serde_json::to_value(Platform::ReactNative).unwrap(), "react-native");
        let parsed: Platform = serde_json::from_value(json!("vue")).unwrap();
        assert_eq!(parsed, Platform::Vue);
    }
}
