//! 终端测验 - 编排层
//!
//! 抽题后在终端逐题作答，结束时输出成绩并保存作答记录，
//! 作答记录可直接交给成绩提交器使用

use crate::config::Config;
use crate::models::{load_questions, save_answers, AnswerEvent, Question};
use crate::services::{sample_quiz, tally_domains, SampledQuestion};
use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, BufRead, Write};
use tracing::info;

/// 一次测验的结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuizSummary {
    pub answers: Vec<AnswerEvent>,
    pub correct: usize,
    pub asked: usize,
    pub points: u32,
    pub max_points: u32,
}

impl QuizSummary {
    /// 正确率（按已出题目计）
    pub fn percentage(&self) -> f64 {
        if self.asked == 0 {
            return 0.0;
        }
        self.correct as f64 / self.asked as f64 * 100.0
    }
}

/// 读取一个选择
///
/// `Ok(None)` 表示输入结束，`Ok(Some(None))` 表示跳过
fn read_choice<I: BufRead, O: Write>(
    input: &mut I,
    output: &mut O,
    option_count: usize,
) -> io::Result<Option<Option<usize>>> {
    loop {
        write!(output, "Votre réponse (1-{}, Entrée pour passer) : ", option_count)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let line = line.trim();
        if line.is_empty() {
            return Ok(Some(None));
        }
        match line.parse::<usize>() {
            Ok(n) if (1..=option_count).contains(&n) => return Ok(Some(Some(n - 1))),
            _ => writeln!(output, "Choix invalide : {}", line)?,
        }
    }
}

/// 逐题提问
///
/// 展示顺序由 `sampled` 决定，记录时映射回原始选项下标
pub fn run_quiz<I: BufRead, O: Write>(
    questions: &[Question],
    sampled: &[SampledQuestion],
    input: &mut I,
    output: &mut O,
) -> io::Result<QuizSummary> {
    let mut summary = QuizSummary::default();
    let total = sampled.len();

    for (position, item) in sampled.iter().enumerate() {
        let question = &questions[item.index];

        writeln!(output)?;
        writeln!(
            output,
            "Question {}/{} [{} | {}]",
            position + 1,
            total,
            question.competence,
            question.level.label()
        )?;
        writeln!(output, "{}", question.text)?;
        for (shown, &original) in item.option_order.iter().enumerate() {
            writeln!(output, "  {}. {}", shown + 1, question.options[original].text)?;
        }

        let Some(choice) = read_choice(input, output, item.option_order.len())? else {
            writeln!(output, "\nFin de saisie, test interrompu.")?;
            break;
        };

        summary.asked += 1;
        summary.max_points += question.points_or_default();

        let Some(shown) = choice else {
            summary.answers.push(AnswerEvent::unanswered(item.index));
            writeln!(output, "Question passée.")?;
            continue;
        };

        let original = item.option_order[shown];
        summary.answers.push(AnswerEvent::new(item.index, original));

        if question.options[original].is_correct {
            summary.correct += 1;
            summary.points += question.points_or_default();
            writeln!(output, "✔ Bonne réponse")?;
        } else {
            let expected = question
                .correct_index()
                .map(|i| question.options[i].text.as_str())
                .unwrap_or("-");
            writeln!(output, "✘ Mauvaise réponse (attendu : {})", expected)?;
        }
        if let Some(comment) = question.comment() {
            writeln!(output, "  {}", comment)?;
        }
    }

    print_summary(questions, &summary, output)?;
    Ok(summary)
}

fn print_summary<O: Write>(questions: &[Question], summary: &QuizSummary, output: &mut O) -> io::Result<()> {
    writeln!(output)?;
    writeln!(output, "{}", "=".repeat(60))?;
    writeln!(
        output,
        "Score : {}/{} ({:.1}%) - {}/{} points",
        summary.correct,
        summary.asked,
        summary.percentage(),
        summary.points,
        summary.max_points
    )?;
    for (domain, score) in tally_domains(&summary.answers, questions) {
        writeln!(
            output,
            "  {} : {}/{} ({:.1}%)",
            domain,
            score.correct,
            score.total,
            score.percentage()
        )?;
    }
    writeln!(output, "{}", "=".repeat(60))?;
    Ok(())
}

/// 在阻塞线程池中运行测验，避免终端读取占用异步运行时
///
/// 返回测验结果和输出端
pub async fn run_quiz_detached<I, O>(
    questions: Vec<Question>,
    sampled: Vec<SampledQuestion>,
    mut input: I,
    mut output: O,
) -> Result<(QuizSummary, O)>
where
    I: BufRead + Send + 'static,
    O: Write + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let summary = run_quiz(&questions, &sampled, &mut input, &mut output)?;
        Ok::<_, io::Error>((summary, output))
    })
    .await
    .context("终端交互任务异常退出")?
    .context("终端交互失败")
}

/// 按配置抽题、在终端作答并保存作答记录
pub async fn run_from_config(config: &Config) -> Result<QuizSummary> {
    let input = config.questions_input_path();
    let questions = load_questions(&input)
        .await
        .with_context(|| format!("无法加载题库: {}", input.display()))?;

    let mut rng = StdRng::from_entropy();
    let sampled = sample_quiz(&questions, &config.quiz_levels, config.quiz_num_questions, &mut rng);
    info!("🎲 已抽取 {} 道题目", sampled.len());

    let (summary, _) =
        run_quiz_detached(questions, sampled, io::BufReader::new(io::stdin()), io::stdout()).await?;

    let answers_path = config.answers_path();
    save_answers(&answers_path, &summary.answers)
        .await
        .with_context(|| format!("无法保存作答记录: {}", answers_path.display()))?;
    info!("📁 作答记录已保存: {}", answers_path.display());

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Level, QuestionOption};
    use serde_json::json;
    use std::io::Cursor;

    fn bank() -> Vec<Question> {
        let mut first = Question::new(
            "Quel moteur de recherche ?",
            "1.1",
            Level::Initial,
            "DOMAINE 1 : INFORMATIONS ET DONNÉES",
            vec![
                QuestionOption::new("Un navigateur", false),
                QuestionOption::new("Un moteur de recherche", true),
                QuestionOption::new("Un tableur", false),
            ],
        );
        first.record.insert("commentaire".to_string(), json!("Le moteur indexe les pages."));
        first.record.insert("points".to_string(), json!(2));

        let second = Question::new(
            "Quel mot de passe est robuste ?",
            "4.1",
            Level::Initial,
            "DOMAINE 4 : PROTECTION",
            vec![
                QuestionOption::new("123456", false),
                QuestionOption::new("k8#Qz!7mPw", true),
            ],
        );
        vec![first, second]
    }

    fn sampled() -> Vec<SampledQuestion> {
        vec![
            SampledQuestion {
                index: 0,
                option_order: vec![2, 1, 0],
            },
            SampledQuestion {
                index: 1,
                option_order: vec![1, 0],
            },
        ]
    }

    #[test]
    fn test_displayed_choice_maps_to_original_index() {
        let bank = bank();
        let mut input = Cursor::new("2\n1\n");
        let mut output = Vec::new();

        let summary = run_quiz(&bank, &sampled(), &mut input, &mut output).unwrap();

        assert_eq!(summary.answers, vec![AnswerEvent::new(0, 1), AnswerEvent::new(1, 1)]);
        assert_eq!(summary.correct, 2);
        assert_eq!(summary.points, 3);
        assert_eq!(summary.max_points, 3);

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Le moteur indexe les pages."));
        assert!(text.contains("Score : 2/2"));
    }

    #[test]
    fn test_invalid_input_reprompts_and_blank_skips() {
        let bank = bank();
        let mut input = Cursor::new("9\nabc\n\n2\n");
        let mut output = Vec::new();

        let summary = run_quiz(&bank, &sampled(), &mut input, &mut output).unwrap();

        assert_eq!(summary.answers, vec![AnswerEvent::unanswered(0), AnswerEvent::new(1, 0)]);
        assert_eq!(summary.correct, 0);
        assert_eq!(summary.asked, 2);

        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("Choix invalide").count(), 2);
    }

    #[test]
    fn test_end_of_input_stops_quiz() {
        let bank = bank();
        let mut input = Cursor::new("2\n");
        let mut output = Vec::new();

        let summary = run_quiz(&bank, &sampled(), &mut input, &mut output).unwrap();

        assert_eq!(summary.asked, 1);
        assert_eq!(summary.answers.len(), 1);
        assert!((summary.percentage() - 100.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_detached_quiz_runs_off_the_runtime() {
        let input = Cursor::new("2\n\n".to_string());
        let (summary, output) = run_quiz_detached(bank(), sampled(), input, Vec::new()).await.unwrap();

        assert_eq!(summary.answers, vec![AnswerEvent::new(0, 1), AnswerEvent::unanswered(1)]);
        assert_eq!(summary.correct, 1);
        assert!(String::from_utf8(output).unwrap().contains("Score : 1/2"));
    }
}
