//! 离线示例故事目录
//!
//! 没有配置 API 密钥时使用的固定故事集。目录是一个显式有序的
//! (关键词, 故事) 优先级列表：匹配按列表顺序进行，首个命中生效，
//! 不依赖任何容器的迭代顺序。
//!
//! 匹配规则：大小写不敏感的双向子串匹配 —— 目录关键词是输入主题的
//! 子串，或输入主题是目录关键词的子串。都未命中时回退到默认故事
//! （magical forest 的正文），标题由主题原文合成。

use crate::generator::GeneratedStory;

/// 未提供孩子名字时使用的默认名
pub const DEFAULT_CHILD_NAME: &str = "Alex";

/// 一条示例故事：标题和正文中的 `{name}` 在取用时替换为孩子名字
pub struct DemoStory {
    pub key: &'static str,
    pub title: &'static str,
    pub body: &'static str,
}

/// 示例故事优先级列表（顺序即匹配优先级）
pub const DEMO_STORIES: &[DemoStory] = &[
    DemoStory {
        key: "brave princess",
        title: "{name} and the Crystal Castle",
        body: BRAVE_PRINCESS_BODY,
    },
    DemoStory {
        key: "space adventure",
        title: "{name} and the Sleepy Stars",
        body: SPACE_ADVENTURE_BODY,
    },
    DemoStory {
        key: "friendly dragon",
        title: "{name} and the Rainbow Dragon",
        body: FRIENDLY_DRAGON_BODY,
    },
    DemoStory {
        key: "magical forest",
        title: "{name} and the Whispering Trees",
        body: MAGICAL_FOREST_BODY,
    },
];

/// 默认回退故事的正文（magical forest）
const DEFAULT_STORY_BODY: &str = MAGICAL_FOREST_BODY;

/// 从目录中选择示例故事
///
/// `child_name` 为空白时使用默认名。未命中任何关键词时返回默认正文，
/// 标题合成为 `"{name} and the {Theme Title Case} Adventure"`。
pub fn pick_demo_story(theme: &str, child_name: Option<&str>) -> GeneratedStory {
    let name = child_name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_CHILD_NAME);
    let theme_lc = theme.to_lowercase();

    let matched = DEMO_STORIES
        .iter()
        .find(|story| theme_lc.contains(story.key) || story.key.contains(theme_lc.as_str()));

    match matched {
        Some(story) => GeneratedStory {
            title: fill_name(story.title, name),
            content: fill_name(story.body, name),
            is_fallback: true,
        },
        None => GeneratedStory {
            title: format!("{name} and the {} Adventure", title_case(theme)),
            content: fill_name(DEFAULT_STORY_BODY, name),
            is_fallback: true,
        },
    }
}

/// 替换模板中的所有 `{name}` 占位符
fn fill_name(template: &str, name: &str) -> String {
    template.replace("{name}", name)
}

/// 与 Python `str.title()` 一致的标题大小写：
/// 紧跟在非字母字符之后的字母大写，其余字母小写
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut prev_is_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_is_alpha {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            prev_is_alpha = true;
        } else {
            result.push(c);
            prev_is_alpha = false;
        }
    }
    result
}

// ============================================================================
// 故事文本
// ============================================================================

const BRAVE_PRINCESS_BODY: &str = "\
Once upon a time, in a land filled with shimmering rainbows and gentle clouds, there lived a brave little person named {name}. {name} had always dreamed of visiting the magical Crystal Castle that sparkled on top of the highest hill.

One sunny morning, {name} decided it was time for an adventure. With a small backpack filled with snacks and a heart full of courage, {name} began the journey up the winding path.

Along the way, {name} met a lost baby rabbit who was crying softly. \"Don't worry, little friend,\" said {name} kindly. \"I'll help you find your family.\" Together, they searched until they found the rabbit's cozy burrow.

The grateful rabbit's mother gave {name} a special crystal that glowed with warm, golden light. \"This will guide you safely,\" she said with a smile.

When {name} finally reached the Crystal Castle, the doors opened wide to reveal a beautiful garden filled with flowers that sang gentle lullabies. The castle's wise guardian appeared and said, \"Your kindness to the little rabbit has shown your true bravery. Welcome to our peaceful kingdom.\"

{name} spent the day playing with friendly crystal butterflies and listening to the flowers' soothing songs. As the sun began to set, painting the sky in soft pastels, {name} knew it was time to go home.

The journey back was quick and easy, guided by the magical crystal's warm glow. {name} arrived home just as the first stars appeared, feeling proud of the day's adventure and the new friendship made along the way.

That night, {name} fell asleep peacefully, dreaming of crystal butterflies and gentle lullabies, knowing that tomorrow would bring new adventures and chances to help others.";

const SPACE_ADVENTURE_BODY: &str = "\
High above the clouds, where the stars twinkle like diamonds, lived a young space explorer named {name}. {name} had a special rocket ship painted in soft blues and silvers that could fly among the stars.

One peaceful evening, {name} noticed that some stars seemed dimmer than usual. \"I wonder if they're feeling sleepy,\" thought {name}. With a gentle whoosh, the rocket ship lifted off into the velvet night sky.

As {name} flew closer to the stars, they discovered that the stars were indeed very tired. \"We've been shining all day and all night,\" yawned a particularly drowsy star. \"We need someone to sing us a lullaby.\"

{name} had the perfect idea. From the rocket ship's special music box, {name} played the most beautiful, gentle melody that floated through space like silver ribbons. One by one, the tired stars began to smile and shine more brightly.

The moon, who had been watching with delight, gave {name} a gift – a small bottle of moonbeam dust that sparkled like glitter. \"Sprinkle this wherever you go,\" said the moon kindly, \"and it will bring peaceful dreams.\"

{name} flew home slowly, sprinkling the magical moonbeam dust over all the houses below. Children everywhere began to have the most wonderful, peaceful dreams filled with gentle starlight and soft lullabies.

Back on Earth, {name} parked the rocket ship safely in the backyard and climbed into bed. The friendly stars winked goodnight through the window, and {name} drifted off to sleep, surrounded by the gentle glow of moonbeam dust and the quiet songs of happy stars.";

const FRIENDLY_DRAGON_BODY: &str = "\
In a valley surrounded by rolling green hills, there lived a gentle dragon named Rainbow who had scales that shimmered with every color imaginable. Unlike the scary dragons in old stories, Rainbow was kind and loved making friends with children.

One day, a curious child named {name} was exploring the hills when they heard a soft, musical humming. Following the sound, {name} discovered Rainbow sitting by a peaceful pond, carefully tending to a garden of the most beautiful flowers anyone had ever seen.

\"Hello there,\" said Rainbow with a warm smile. \"I'm Rainbow, and I take care of this magical garden. Each flower here represents a different dream that children have at night.\"

{name} was amazed to see flowers that glowed like stars, petals that sparkled like jewels, and blooms that seemed to dance in the gentle breeze. \"They're beautiful!\" {name} exclaimed.

Rainbow explained that every night, the dragon would collect the sweetest dreams from the flowers and blow them gently into the wind, so they could find their way to sleeping children all around the world.

\"Would you like to help me tonight?\" asked Rainbow. {name} nodded eagerly, and together they carefully gathered the dream-essence from each flower. Rainbow showed {name} how to whisper kind wishes into the magical mist.

As the evening stars appeared, Rainbow gently breathed the collected dreams into the night sky, where they transformed into twinkling lights that danced toward distant homes. {name} watched in wonder as the dreams floated away like gentle fireflies.

\"Thank you for helping me,\" said Rainbow. \"Because of your kindness, children everywhere will have especially sweet dreams tonight.\" Rainbow gave {name} a small, glowing flower to take home as a reminder of their magical friendship.

That night, {name} placed the special flower by the window and fell asleep with the biggest smile, knowing that somewhere in the hills, Rainbow was making sure everyone had wonderful dreams.";

const MAGICAL_FOREST_BODY: &str = "\
Deep in an enchanted forest where sunbeams danced through emerald leaves, there stood trees that could whisper the most wonderful secrets. A curious child named {name} discovered this magical place while following a pathway of golden leaves.

As {name} walked deeper into the forest, the trees began to whisper gentle greetings. \"Welcome, young friend,\" rustled the wise old oak. \"We've been waiting for someone with a kind heart like yours.\"

The trees explained that they were the guardians of all the forest creatures, and they needed {name}'s help. The woodland animals were preparing for their annual Festival of Friendship, but they had lost their way to the celebration clearing.

{name} eagerly agreed to help. Following the whispered directions from the trees, {name} found a family of lost hedgehogs, guided a confused owl back to his tree, and helped a shy deer find her courage to join the celebration.

As the sun began to set, {name} arrived at a beautiful clearing where animals of all kinds had gathered. There were rabbits with flower crowns, squirrels sharing acorns, and butterflies creating colorful patterns in the air.

The animals cheered when they saw {name} and invited their new friend to join the celebration. They danced under the starlight, shared stories, and the trees provided the most beautiful music by rustling their leaves in harmony.

As a thank-you gift, the animals presented {name} with a special acorn that would always glow softly, serving as a reminder that kindness and helping others creates the most magical adventures.

When it was time to go home, the trees whispered directions for the safest path, and fireflies lit the way. {name} arrived home feeling grateful for the new friends and the magical day in the whispering forest.

That night, {name} held the glowing acorn close and fell asleep to the gentle memory of the trees' whispered songs, dreaming of more adventures with forest friends.";
