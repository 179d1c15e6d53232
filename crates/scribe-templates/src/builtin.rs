//! Built-in templates

use crate::registry::{ParamSpec, TemplateDefinition};

pub const STORY: &str = "story";
pub const MARKETING: &str = "marketing";
pub const OUTLINE: &str = "outline";
pub const FREEFORM: &str = "freeform";

fn topic() -> ParamSpec { ParamSpec::text("topic", "主题") }
fn style() -> ParamSpec { ParamSpec::text("style", "风格") }
fn length() -> ParamSpec { ParamSpec::count("length", "字数").with_suggested_range(100, 2000) }
fn product_name() -> ParamSpec { ParamSpec::text("product_name", "产品名称") }
fn platform() -> ParamSpec { ParamSpec::text("platform", "平台") }
fn selling_point() -> ParamSpec { ParamSpec::text("selling_point", "核心卖点") }
fn paper_title() -> ParamSpec { ParamSpec::text("paper_title", "论文题目") }
fn field() -> ParamSpec { ParamSpec::text("field", "学科") }
fn chapter_count() -> ParamSpec { ParamSpec::count("chapter_count", "章节数").with_suggested_range(3, 10) }
fn user_input() -> ParamSpec { ParamSpec::text("user_input", "用户输入") }
fn setting() -> ParamSpec { ParamSpec::text("setting", "背景") }

pub fn story() -> TemplateDefinition {
    TemplateDefinition::from_parts(
        STORY,
        "故事生成",
        "请以{topic}为核心，写一个{style}风格的短篇故事，字数控制在{length}字左右。要求情节完整，角色鲜明，语言流畅。",
        vec![topic(), style(), length()],
    )
}

pub fn marketing() -> TemplateDefinition {
    TemplateDefinition::from_parts(
        MARKETING,
        "营销文案",
        "为{product_name}撰写{platform}平台的营销文案，突出{selling_point}，语言风格{style}，字数控制在{length}字内。需吸引目标用户，激发购买欲。",
        vec![product_name(), platform(), selling_point(), style(), length()],
    )
}

pub fn outline() -> TemplateDefinition {
    TemplateDefinition::from_parts(
        OUTLINE,
        "论文提纲",
        "为《{paper_title}》（{field}领域）设计详细提纲，逻辑清晰，结构完整，至少包含{chapter_count}个章节。需列出每个章节的核心研究内容和逻辑关联。",
        vec![paper_title(), field(), chapter_count()],
    )
}

pub fn freeform() -> TemplateDefinition {
    TemplateDefinition::from_parts(FREEFORM, "自由创作", "{user_input}", vec![user_input()])
}

// --- Variants taking the shared `setting` parameter ---

pub fn story_with_setting() -> TemplateDefinition {
    TemplateDefinition::from_parts(
        STORY,
        "故事生成",
        "请以{topic}为核心，在{setting}背景下，写一个{style}风格的短篇故事，字数控制在{length}字左右。要求情节完整，角色鲜明，语言流畅。",
        vec![topic(), setting(), style(), length()],
    )
}

pub fn marketing_with_setting() -> TemplateDefinition {
    TemplateDefinition::from_parts(
        MARKETING,
        "营销文案",
        "为{product_name}撰写{platform}平台的营销文案，突出{selling_point}，结合{setting}场景，语言风格{style}，字数控制在{length}字内。需吸引目标用户，激发购买欲。",
        vec![product_name(), platform(), selling_point(), setting(), style(), length()],
    )
}

pub fn outline_with_setting() -> TemplateDefinition {
    TemplateDefinition::from_parts(
        OUTLINE,
        "论文提纲",
        "为《{paper_title}》（{field}领域）设计详细提纲，结合{setting}研究背景，逻辑清晰，结构完整，至少包含{chapter_count}个章节。需列出每个章节的核心研究内容和逻辑关联。",
        vec![paper_title(), field(), setting(), chapter_count()],
    )
}
