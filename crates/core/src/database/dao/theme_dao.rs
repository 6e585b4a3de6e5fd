//! 主题目录数据访问层
//!
//! 主题名称统一小写存储；popularity_score 只增不减。

use rusqlite::{params, Connection, Row};

use crate::errors::ThemeError;
use crate::models::story_model::Theme;

/// 主题 DAO
pub struct ThemeDao;

impl ThemeDao {
    // ------------------------------------------------------------------------
    // 计数更新
    // ------------------------------------------------------------------------

    /// 按主题名更新计数：命中则 +1，未命中则新建
    ///
    /// 名称按小写精确匹配。新建条目分类固定为 `user_generated`，
    /// 描述保留用户输入的原始大小写。
    pub fn bump_or_insert(conn: &Connection, theme: &str) -> Result<(), ThemeError> {
        let name = theme.to_lowercase();
        let affected = conn.execute(
            "UPDATE themes SET popularity_score = popularity_score + 1 WHERE name = ?",
            [&name],
        )?;

        if affected == 0 {
            conn.execute(
                "INSERT INTO themes (name, description, category, popularity_score)
                 VALUES (?1, ?2, 'user_generated', 1)",
                params![name, format!("Stories about {theme}")],
            )?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // 查询
    // ------------------------------------------------------------------------

    /// 按人气降序取前 `limit` 个主题
    pub fn top(conn: &Connection, limit: u32) -> Result<Vec<Theme>, ThemeError> {
        let mut stmt = conn.prepare(
            "SELECT id, name, description, category, popularity_score
             FROM themes
             ORDER BY popularity_score DESC, name ASC
             LIMIT ?",
        )?;

        let themes = stmt
            .query_map([limit], |row| Self::map_row(row))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(themes)
    }

    /// 按小写名称查询单个主题
    pub fn get_by_name(conn: &Connection, name: &str) -> Result<Option<Theme>, ThemeError> {
        let mut stmt = conn.prepare(
            "SELECT id, name, description, category, popularity_score
             FROM themes WHERE name = ?",
        )?;

        let mut rows = stmt.query([name.to_lowercase()])?;
        if let Some(row) = rows.next()? {
            Ok(Some(Self::map_row(row)?))
        } else {
            Ok(None)
        }
    }

    fn map_row(row: &Row) -> rusqlite::Result<Theme> {
        Ok(Theme {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            category: row.get(3)?,
            popularity_score: row.get(4)?,
        })
    }
}
